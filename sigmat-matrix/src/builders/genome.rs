use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

///
/// Transcription-strand annotation of one genomic position.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Transcribed,
    Untranscribed,
    NonTranscribed,
    Bidirectional,
}

impl Strand {
    pub fn prefix(&self) -> char {
        match self {
            Strand::Transcribed => 'T',
            Strand::Untranscribed => 'U',
            Strand::NonTranscribed => 'N',
            Strand::Bidirectional => 'B',
        }
    }
}

///
/// Read-only reference sequence access for catalogue builders.
///
/// Positions are 1-based. Implementations return `None` for positions
/// outside the known sequence; builders skip records whose surrounding
/// context cannot be resolved.
///
pub trait ReferenceGenome {
    /// Upper-case reference base at a position.
    fn base(&self, chrom: &str, position: u64) -> Option<char>;

    /// Transcription-strand annotation at a position. Implementations
    /// without strand data report every locus as non-transcribed.
    fn strand(&self, chrom: &str, position: u64) -> Strand {
        let _ = (chrom, position);
        Strand::NonTranscribed
    }

    /// The reference bases at `position` with `flank` bases on each side,
    /// or `None` if any of them fall outside the sequence.
    fn context(&self, chrom: &str, position: u64, flank: usize) -> Option<String> {
        let flank = flank as u64;
        if position <= flank {
            return None;
        }

        let mut bases = String::with_capacity((2 * flank + 1) as usize);
        for offset in (position - flank)..=(position + flank) {
            bases.push(self.base(chrom, offset)?);
        }
        Some(bases)
    }
}

///
/// Reference genome backed by per-chromosome sequence files.
///
/// The directory holds one plain-text file per chromosome (`1.txt`,
/// `X.txt`, ...) containing the raw sequence. Chromosomes are loaded
/// lazily and cached for the duration of the run; a missing file simply
/// yields no bases, so flanked contexts skip records on that chromosome.
///
#[derive(Debug)]
pub struct DirGenome {
    dir: PathBuf,
    cache: RefCell<HashMap<String, Option<Vec<u8>>>>,
}

impl DirGenome {
    pub fn new<P: Into<PathBuf>>(dir: P) -> DirGenome {
        DirGenome {
            dir: dir.into(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    fn load(&self, chrom: &str) -> Option<Vec<u8>> {
        let path = self.dir.join(format!("{}.txt", chrom));
        let raw = std::fs::read(path).ok()?;

        let sequence: Vec<u8> = raw
            .into_iter()
            .filter(|byte| !byte.is_ascii_whitespace())
            .map(|byte| byte.to_ascii_uppercase())
            .collect();

        Some(sequence)
    }
}

impl ReferenceGenome for DirGenome {
    fn base(&self, chrom: &str, position: u64) -> Option<char> {
        if position == 0 {
            return None;
        }

        let mut cache = self.cache.borrow_mut();
        let sequence = cache
            .entry(chrom.to_string())
            .or_insert_with(|| self.load(chrom));

        sequence
            .as_ref()
            .and_then(|bases| bases.get(position as usize - 1))
            .map(|byte| *byte as char)
    }
}

///
/// In-memory reference genome with optional strand annotations.
///
#[derive(Debug, Default)]
pub struct InMemoryGenome {
    sequences: HashMap<String, Vec<u8>>,
    strands: HashMap<(String, u64), Strand>,
}

impl InMemoryGenome {
    pub fn new() -> InMemoryGenome {
        InMemoryGenome::default()
    }

    pub fn insert_sequence(&mut self, chrom: &str, sequence: &str) {
        self.sequences.insert(
            chrom.to_string(),
            sequence.trim().to_uppercase().into_bytes(),
        );
    }

    pub fn annotate_strand(&mut self, chrom: &str, position: u64, strand: Strand) {
        self.strands.insert((chrom.to_string(), position), strand);
    }
}

impl ReferenceGenome for InMemoryGenome {
    fn base(&self, chrom: &str, position: u64) -> Option<char> {
        if position == 0 {
            return None;
        }
        self.sequences
            .get(chrom)
            .and_then(|bases| bases.get(position as usize - 1))
            .map(|byte| *byte as char)
    }

    fn strand(&self, chrom: &str, position: u64) -> Strand {
        self.strands
            .get(&(chrom.to_string(), position))
            .copied()
            .unwrap_or(Strand::NonTranscribed)
    }
}
