/// Mnemonic of an instruction.
///
/// This represents the operation that is performed by the instruction. Mnemonics are parsed and
/// displayed in lower case, e.g. `lda`.
#[derive(
    Debug,
    Hash,
    Eq,
    PartialEq,
    Clone,
    Copy,
    strum_macros::EnumString,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mnemonic {
    ADC,
    AND,
    ASL,
    BCC,
    BCS,
    BEQ,
    BIT,
    BMI,
    BNE,
    BPL,
    BRK,
    BVC,
    BVS,
    CLC,
    CLD,
    CLI,
    CLV,
    CMP,
    CPX,
    CPY,
    DEC,
    DEX,
    DEY,
    EOR,
    INC,
    INX,
    INY,
    JMP,
    JSR,
    LDA,
    LDX,
    LDY,
    LSR,
    NOP,
    ORA,
    PHA,
    PHP,
    PLA,
    PLP,
    ROL,
    ROR,
    RTI,
    RTS,
    SBC,
    SEC,
    SED,
    SEI,
    STA,
    STX,
    STY,
    TAX,
    TAY,
    TSX,
    TXA,
    TXS,
    TYA,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_mnemonic() {
        let tests = vec![
            ("lda", Mnemonic::LDA),
            ("LDA", Mnemonic::LDA),
            ("bvs", Mnemonic::BVS),
            ("bvc", Mnemonic::BVC),
            ("Tya", Mnemonic::TYA),
        ];
        for (input, expected) in tests {
            assert_eq!(Mnemonic::from_str(input), Ok(expected));
        }
        assert!(Mnemonic::from_str("lda.w").is_err());
        assert!(Mnemonic::from_str("").is_err());
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(Mnemonic::JSR.to_string(), "jsr");
    }

    #[test]
    fn test_documented_mnemonics() {
        assert_eq!(Mnemonic::iter().count(), 56);
    }
}
