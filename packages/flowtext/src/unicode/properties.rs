//! Property values stored in the codepoint tries

use bitflags::bitflags;
use icu_properties::props::{
    GraphemeClusterBreak, IndicConjunctBreak as IcuIndicConjunctBreak, LineBreak,
};

/// Grapheme_Cluster_Break classes used by the boundary rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum GraphemeClass {
    #[default]
    Other = 0,
    CR = 1,
    LF = 2,
    Control = 3,
    Extend = 4,
    RegionalIndicator = 5,
    SpacingMark = 6,
    L = 7,
    V = 8,
    T = 9,
    LV = 10,
    LVT = 11,
    Prepend = 12,
    ZWJ = 13,
}

impl GraphemeClass {
    pub const fn from_u32(value: u32) -> Self {
        match value {
            1 => Self::CR,
            2 => Self::LF,
            3 => Self::Control,
            4 => Self::Extend,
            5 => Self::RegionalIndicator,
            6 => Self::SpacingMark,
            7 => Self::L,
            8 => Self::V,
            9 => Self::T,
            10 => Self::LV,
            11 => Self::LVT,
            12 => Self::Prepend,
            13 => Self::ZWJ,
            _ => Self::Other,
        }
    }

    /// CR, LF and Control all break on both sides (GB4, GB5)
    #[inline]
    pub const fn is_control(self) -> bool {
        matches!(self, Self::CR | Self::LF | Self::Control)
    }

    /// The emoji-era classes (E_Base, E_Modifier, Glue_After_Zwj) were folded
    /// into Other and Extend in Unicode 11
    pub fn from_icu(value: GraphemeClusterBreak) -> Self {
        match value {
            GraphemeClusterBreak::CR => Self::CR,
            GraphemeClusterBreak::LF => Self::LF,
            GraphemeClusterBreak::Control => Self::Control,
            GraphemeClusterBreak::Extend | GraphemeClusterBreak::EModifier => Self::Extend,
            GraphemeClusterBreak::RegionalIndicator => Self::RegionalIndicator,
            GraphemeClusterBreak::SpacingMark => Self::SpacingMark,
            GraphemeClusterBreak::L => Self::L,
            GraphemeClusterBreak::V => Self::V,
            GraphemeClusterBreak::T => Self::T,
            GraphemeClusterBreak::LV => Self::LV,
            GraphemeClusterBreak::LVT => Self::LVT,
            GraphemeClusterBreak::Prepend => Self::Prepend,
            GraphemeClusterBreak::ZWJ => Self::ZWJ,
            _ => Self::Other,
        }
    }
}

/// Indic_Conjunct_Break values (GB9c)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum IndicConjunctBreak {
    #[default]
    None = 0,
    Consonant = 1,
    Extend = 2,
    Linker = 3,
}

impl IndicConjunctBreak {
    pub const fn from_u32(value: u32) -> Self {
        match value {
            1 => Self::Consonant,
            2 => Self::Extend,
            3 => Self::Linker,
            _ => Self::None,
        }
    }

    pub fn from_icu(value: IcuIndicConjunctBreak) -> Self {
        match value {
            IcuIndicConjunctBreak::Consonant => Self::Consonant,
            IcuIndicConjunctBreak::Extend => Self::Extend,
            IcuIndicConjunctBreak::Linker => Self::Linker,
            _ => Self::None,
        }
    }
}

bitflags! {
    /// Emoji properties of a code point, stored as bits in the emoji trie
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EmojiFlags: u32 {
        const EMOJI = 1;
        const PRESENTATION = 1 << 1;
        const MODIFIER = 1 << 2;
        const MODIFIER_BASE = 1 << 3;
        const EXTENDED_PICTOGRAPHIC = 1 << 4;
    }
}

/// Line_Break property values.
///
/// The first group takes part in the pair table. The second is either
/// handled before the table is consulted or resolved to a table class by
/// [`LineBreakClass::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum LineBreakClass {
    OP,
    CL,
    CP,
    QU,
    GL,
    NS,
    EX,
    SY,
    IS,
    PR,
    PO,
    NU,
    AL,
    HL,
    ID,
    IN,
    HY,
    BA,
    BB,
    B2,
    ZW,
    CM,
    WJ,
    H2,
    H3,
    JL,
    JV,
    JT,
    RI,
    EB,
    EM,
    ZWJ,
    CB,

    AI,
    BK,
    CJ,
    CR,
    LF,
    NL,
    SA,
    SG,
    SP,
    #[default]
    XX,
    AK,
    AP,
    AS,
    VF,
    VI,
}

impl LineBreakClass {
    const ALL: [Self; 48] = [
        Self::OP, Self::CL, Self::CP, Self::QU, Self::GL, Self::NS, Self::EX, Self::SY,
        Self::IS, Self::PR, Self::PO, Self::NU, Self::AL, Self::HL, Self::ID, Self::IN,
        Self::HY, Self::BA, Self::BB, Self::B2, Self::ZW, Self::CM, Self::WJ, Self::H2,
        Self::H3, Self::JL, Self::JV, Self::JT, Self::RI, Self::EB, Self::EM, Self::ZWJ,
        Self::CB, Self::AI, Self::BK, Self::CJ, Self::CR, Self::LF, Self::NL, Self::SA,
        Self::SG, Self::SP, Self::XX, Self::AK, Self::AP, Self::AS, Self::VF, Self::VI,
    ];

    pub fn from_u32(value: u32) -> Self {
        Self::ALL.get(value as usize).copied().unwrap_or(Self::XX)
    }

    /// Class used for pair lookups. Ambiguous, complex-context, unknown and
    /// aksara characters act as alphabetic; conditional Japanese starters
    /// act as nonstarters.
    pub fn resolve(self) -> Self {
        match self {
            Self::AI | Self::SA | Self::SG | Self::XX => Self::AL,
            Self::AK | Self::AP | Self::AS | Self::VF | Self::VI => Self::AL,
            Self::CJ => Self::NS,
            other => other,
        }
    }

    pub fn from_icu(value: LineBreak) -> Self {
        match value {
            LineBreak::MandatoryBreak => Self::BK,
            LineBreak::CarriageReturn => Self::CR,
            LineBreak::LineFeed => Self::LF,
            LineBreak::CombiningMark => Self::CM,
            LineBreak::NextLine => Self::NL,
            LineBreak::Surrogate => Self::SG,
            LineBreak::WordJoiner => Self::WJ,
            LineBreak::ZWSpace => Self::ZW,
            LineBreak::Glue => Self::GL,
            LineBreak::Space => Self::SP,
            LineBreak::ZWJ => Self::ZWJ,
            LineBreak::Alphabetic => Self::AL,
            LineBreak::BreakBoth => Self::B2,
            LineBreak::BreakAfter => Self::BA,
            LineBreak::BreakBefore => Self::BB,
            LineBreak::Hyphen => Self::HY,
            LineBreak::ContingentBreak => Self::CB,
            LineBreak::ClosePunctuation => Self::CL,
            LineBreak::CloseParenthesis => Self::CP,
            LineBreak::Exclamation => Self::EX,
            LineBreak::Inseparable => Self::IN,
            LineBreak::Nonstarter => Self::NS,
            LineBreak::OpenPunctuation => Self::OP,
            LineBreak::Quotation => Self::QU,
            LineBreak::InfixNumeric => Self::IS,
            LineBreak::Numeric => Self::NU,
            LineBreak::PostfixNumeric => Self::PO,
            LineBreak::PrefixNumeric => Self::PR,
            LineBreak::BreakSymbols => Self::SY,
            LineBreak::Ambiguous => Self::AI,
            LineBreak::ConditionalJapaneseStarter => Self::CJ,
            LineBreak::H2 => Self::H2,
            LineBreak::H3 => Self::H3,
            LineBreak::HebrewLetter => Self::HL,
            LineBreak::Ideographic => Self::ID,
            LineBreak::JL => Self::JL,
            LineBreak::JV => Self::JV,
            LineBreak::JT => Self::JT,
            LineBreak::RegionalIndicator => Self::RI,
            LineBreak::ComplexContext => Self::SA,
            LineBreak::EBase => Self::EB,
            LineBreak::EModifier => Self::EM,
            LineBreak::Aksara => Self::AK,
            LineBreak::AksaraPrebase => Self::AP,
            LineBreak::AksaraStart => Self::AS,
            LineBreak::ViramaFinal => Self::VF,
            LineBreak::Virama => Self::VI,
            _ => Self::XX,
        }
    }
}
