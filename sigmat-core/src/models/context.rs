use std::fmt::{self, Display};

///
/// A mutation-context classification scheme. The display name doubles as the
/// key of the scheme's table in the final result mapping.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationContext {
    Sbs6,
    Sbs12,
    Sbs96,
    Sbs192,
    Sbs1536,
    Sbs3072,
    Dinuc,
    Indel,
}

impl MutationContext {
    pub fn name(&self) -> &'static str {
        match self {
            MutationContext::Sbs6 => "6",
            MutationContext::Sbs12 => "12",
            MutationContext::Sbs96 => "96",
            MutationContext::Sbs192 => "192",
            MutationContext::Sbs1536 => "1536",
            MutationContext::Sbs3072 => "3072",
            MutationContext::Dinuc => "DINUC",
            MutationContext::Indel => "INDEL",
        }
    }

    /// Number of flanking reference bases on each side of the substitution.
    pub fn flank(&self) -> usize {
        match self {
            MutationContext::Sbs6 | MutationContext::Sbs12 => 0,
            MutationContext::Sbs96 | MutationContext::Sbs192 => 1,
            MutationContext::Sbs1536 | MutationContext::Sbs3072 => 2,
            MutationContext::Dinuc | MutationContext::Indel => 0,
        }
    }

    /// Whether context keys are split by transcription strand. Strand-split
    /// schemes only count loci with a transcribed/untranscribed annotation.
    pub fn strand_split(&self) -> bool {
        matches!(self, MutationContext::Sbs192 | MutationContext::Sbs3072)
    }

    /// Whether substitution keys are normalized to a pyrimidine reference
    /// base. The 12-key scheme keeps all substitutions unnormalized.
    pub fn pyrimidine_normalized(&self) -> bool {
        !matches!(
            self,
            MutationContext::Sbs12 | MutationContext::Dinuc | MutationContext::Indel
        )
    }
}

impl Display for MutationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
