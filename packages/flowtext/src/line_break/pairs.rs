//! Pair table for line break opportunities
//!
//! Each entry answers whether a break is allowed between a character of the
//! `before` class and one of the `after` class, possibly separated by
//! spaces. Both classes must already be resolved with
//! [`LineBreakClass::resolve`]. Mandatory breaks, spaces and the stateful
//! rules are handled by the breaker itself.

use crate::unicode::LineBreakClass;

/// Break behaviour for one pair of classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairBreak {
    /// Break allowed directly between the pair
    Direct,
    /// Break allowed only when spaces separate the pair
    Indirect,
    /// A combining mark after the class: attaches to it, or breaks after spaces
    CombiningIndirect,
    /// A combining mark after the class: attaches to it, never breaks
    CombiningProhibited,
    /// No break, even across spaces
    Prohibited,
}

/// Look up the break behaviour between `before` and `after`
pub fn pair_break(before: LineBreakClass, after: LineBreakClass) -> PairBreak {
    use LineBreakClass::*;
    use PairBreak::*;

    // LB10: a mark left without a base acts as a letter
    let before = match before {
        CM | ZWJ => AL,
        other => other,
    };

    match (before, after) {
        // LB8: ZW SP* ÷
        (ZW, _) => Direct,

        // LB9: combining marks take the class of their base
        (OP, CM | ZWJ) => CombiningProhibited,
        (_, CM | ZWJ) => CombiningIndirect,

        // LB7, LB11, LB13: never break before these, spaces or not
        (_, ZW | WJ | CL | CP | EX | IS | SY) => Prohibited,

        // LB14 to LB17: no break across spaces
        (OP, _) => Prohibited,
        (QU, OP) => Prohibited,
        (CL | CP, NS) => Prohibited,
        (B2, B2) => Prohibited,

        // LB11, LB12, LB12a: glue
        (WJ | GL, _) => Indirect,
        (BA | HY, GL) => Direct,
        (_, GL) => Indirect,

        // LB19, LB20: quotation marks, then contingent breaks
        (QU, _) | (_, QU) => Indirect,
        (CB, _) | (_, CB) => Direct,

        // LB21, LB21b, LB22
        (_, BA | HY | NS) | (BB, _) => Indirect,
        (SY, HL) => Indirect,
        (_, IN) => Indirect,

        // LB23, LB23a, LB24: letters, ideographs and numeric affixes
        (AL | HL, NU) | (NU, AL | HL) => Indirect,
        (PR, ID | EB | EM) | (ID | EB | EM, PO) => Indirect,
        (PR | PO, AL | HL) | (AL | HL, PR | PO) => Indirect,

        // LB25: numeric expressions
        (CL | CP | NU, PO | PR) => Indirect,
        (PO | PR, OP | NU) => Indirect,
        (HY | IS | NU | SY, NU) => Indirect,

        // LB26, LB27: Korean syllable blocks
        (JL, JL | JV | H2 | H3) => Indirect,
        (JV | H2, JV | JT) => Indirect,
        (JT | H3, JT) => Indirect,
        (JL | JV | JT | H2 | H3, PO) | (PR, JL | JV | JT | H2 | H3) => Indirect,

        // LB28, LB29, LB30
        (AL | HL, AL | HL) => Indirect,
        (IS, AL | HL) => Indirect,
        (AL | HL | NU, OP) | (CP, AL | HL | NU) => Indirect,

        // LB30a, LB30b: the breaker splits regional indicator pairs
        (RI, RI) => Indirect,
        (EB, EM) => Indirect,

        // LB31
        _ => Direct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LineBreakClass::*;

    #[test]
    fn letters_only_break_across_spaces() {
        assert_eq!(pair_break(AL, AL), PairBreak::Indirect);
        assert_eq!(pair_break(AL, NU), PairBreak::Indirect);
        assert_eq!(pair_break(ID, ID), PairBreak::Direct);
        assert_eq!(pair_break(ID, AL), PairBreak::Direct);
    }

    #[test]
    fn closing_punctuation_never_starts_a_line() {
        for before in [AL, ID, NU, SP, QU, OP, BA] {
            assert_eq!(pair_break(before, CL), PairBreak::Prohibited, "{before:?}");
            assert_eq!(pair_break(before, EX), PairBreak::Prohibited, "{before:?}");
        }
        assert_eq!(pair_break(OP, AL), PairBreak::Prohibited);
        assert_eq!(pair_break(CL, NS), PairBreak::Prohibited);
        assert_eq!(pair_break(QU, OP), PairBreak::Prohibited);
    }

    #[test]
    fn combining_marks_attach_to_their_base() {
        assert_eq!(pair_break(AL, CM), PairBreak::CombiningIndirect);
        assert_eq!(pair_break(ID, ZWJ), PairBreak::CombiningIndirect);
        assert_eq!(pair_break(OP, CM), PairBreak::CombiningProhibited);
        assert_eq!(pair_break(ZW, CM), PairBreak::Direct);
        assert_eq!(pair_break(CM, AL), pair_break(AL, AL));
        assert_eq!(pair_break(ZWJ, NU), pair_break(AL, NU));
    }

    #[test]
    fn glue_and_contingent_breaks() {
        assert_eq!(pair_break(AL, GL), PairBreak::Indirect);
        assert_eq!(pair_break(HY, GL), PairBreak::Direct);
        assert_eq!(pair_break(GL, ID), PairBreak::Indirect);
        assert_eq!(pair_break(AL, CB), PairBreak::Direct);
        assert_eq!(pair_break(QU, CB), PairBreak::Indirect);
    }

    #[test]
    fn numeric_context() {
        assert_eq!(pair_break(PR, NU), PairBreak::Indirect);
        assert_eq!(pair_break(NU, PO), PairBreak::Indirect);
        assert_eq!(pair_break(HY, NU), PairBreak::Indirect);
        assert_eq!(pair_break(HY, AL), PairBreak::Direct);
        assert_eq!(pair_break(NU, IS), PairBreak::Prohibited);
    }
}
