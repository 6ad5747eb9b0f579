bitflags::bitflags! {
    /// Flags carried by a variable during conflict analysis (spec.md §4.6).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct VarFlag: u8 {
        /// visited by the current conflict analysis pass.
        const ANALYZED = 0b0000_0001;
        /// candidate for minimization removal.
        const REMOVABLE = 0b0000_0010;
        /// proven NOT removable during minimization; stop revisiting it.
        const POISONED = 0b0000_0100;
    }
}
