//! Molecular descriptor computation.
//!
//! A [`DescriptorKind`] selects one fingerprinting scheme; the
//! [`FingerprintCalculator`] turns SMILES strings into [`Fingerprint`] bit
//! vectors of the width that kind fixes. The [`Fingerprinter`] trait is the
//! seam the network builder depends on, so alternative descriptor backends
//! (or test stubs) can be injected without touching the orchestration.

pub mod fingerprint;
mod smiles;

pub use fingerprint::Fingerprint;
pub use smiles::SmilesSyntaxError;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Width in bits of the hashed fingerprint kinds.
const HASHED_FINGERPRINT_BITS: usize = 2048;
/// Width in bits of the MACCS-style key fingerprint.
const MACCS_KEY_BITS: usize = 167;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("invalid SMILES string '{smiles}': {reason}")]
    InvalidSmiles {
        smiles: String,
        #[source]
        reason: SmilesSyntaxError,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported descriptor kind '{0}'")]
pub struct ParseDescriptorKindError(pub String);

/// The fingerprinting schemes a calculator can be configured with.
///
/// Mirrors the descriptor families commonly used for molecular similarity:
/// circular environments (`Morgan2`/`Morgan3`), linear paths (`Rdkit`),
/// four-atom torsions (`Topological`), atom pairs with their separation
/// (`AtomPairs`), and a short MACCS-style key set (`Maccs`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DescriptorKind {
    AtomPairs,
    Maccs,
    #[default]
    Morgan2,
    Morgan3,
    Rdkit,
    Topological,
}

impl DescriptorKind {
    /// The fingerprint width this kind produces.
    pub fn num_bits(&self) -> usize {
        match self {
            DescriptorKind::Maccs => MACCS_KEY_BITS,
            _ => HASHED_FINGERPRINT_BITS,
        }
    }
}

impl FromStr for DescriptorKind {
    type Err = ParseDescriptorKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "atompairs" => Ok(DescriptorKind::AtomPairs),
            "maccs" => Ok(DescriptorKind::Maccs),
            "morgan2" => Ok(DescriptorKind::Morgan2),
            "morgan3" => Ok(DescriptorKind::Morgan3),
            "rdkit" => Ok(DescriptorKind::Rdkit),
            "topo" => Ok(DescriptorKind::Topological),
            _ => Err(ParseDescriptorKindError(s.to_string())),
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DescriptorKind::AtomPairs => "atompairs",
            DescriptorKind::Maccs => "maccs",
            DescriptorKind::Morgan2 => "morgan2",
            DescriptorKind::Morgan3 => "morgan3",
            DescriptorKind::Rdkit => "rdkit",
            DescriptorKind::Topological => "topo",
        };
        write!(f, "{}", name)
    }
}

/// Computes a descriptor for one structure.
///
/// Implementors judge parseability of the input and fail with
/// [`DescriptorError::InvalidSmiles`] when the string cannot be scanned.
pub trait Fingerprinter: Send + Sync {
    fn fingerprint(&self, smiles: &str) -> Result<Fingerprint, DescriptorError>;
}

/// The default descriptor provider: hashed atom-environment fingerprints.
///
/// Atom tokens are scanned from the SMILES string and environment fragments
/// (windows over the token sequence, shaped per [`DescriptorKind`]) are
/// hashed into a fixed-width bit vector. The exact bit patterns are an
/// implementation detail; the guarantees are determinism and a fixed width
/// per kind.
#[derive(Debug, Clone, Copy)]
pub struct FingerprintCalculator {
    kind: DescriptorKind,
}

impl FingerprintCalculator {
    pub fn new(kind: DescriptorKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> DescriptorKind {
        self.kind
    }
}

impl Fingerprinter for FingerprintCalculator {
    fn fingerprint(&self, smiles: &str) -> Result<Fingerprint, DescriptorError> {
        let atoms = smiles::scan_atoms(smiles).map_err(|reason| DescriptorError::InvalidSmiles {
            smiles: smiles.to_string(),
            reason,
        })?;

        let mut fp = Fingerprint::new(self.kind.num_bits());
        match self.kind {
            DescriptorKind::Morgan2 => hash_circular(&atoms, 2, &mut fp),
            DescriptorKind::Morgan3 => hash_circular(&atoms, 3, &mut fp),
            DescriptorKind::Maccs => hash_linear(&atoms, 1, 3, &mut fp),
            DescriptorKind::Rdkit => hash_linear(&atoms, 1, 7, &mut fp),
            DescriptorKind::Topological => hash_linear(&atoms, 4, 4, &mut fp),
            DescriptorKind::AtomPairs => hash_pairs(&atoms, &mut fp),
        }
        Ok(fp)
    }
}

/// Circular environments: for each atom, the token windows extending up to
/// `radius` positions to each side, hashed together with their radius.
fn hash_circular(atoms: &[String], radius: usize, fp: &mut Fingerprint) {
    for center in 0..atoms.len() {
        for r in 0..=radius {
            let lo = center.saturating_sub(r);
            let hi = (center + r + 1).min(atoms.len());
            fp.set(hash_fragment(r as u64, &atoms[lo..hi]));
        }
    }
}

/// Linear paths: every contiguous token window with a length in
/// `min_len..=max_len`.
fn hash_linear(atoms: &[String], min_len: usize, max_len: usize, fp: &mut Fingerprint) {
    for len in min_len..=max_len.min(atoms.len()) {
        for window in atoms.windows(len) {
            fp.set(hash_fragment(len as u64, window));
        }
    }
}

/// Atom pairs: every unordered token pair together with its separation in
/// the token sequence.
fn hash_pairs(atoms: &[String], fp: &mut Fingerprint) {
    for i in 0..atoms.len() {
        for j in (i + 1)..atoms.len() {
            let (a, b) = if atoms[i] <= atoms[j] {
                (&atoms[i], &atoms[j])
            } else {
                (&atoms[j], &atoms[i])
            };
            let mut h = fnv1a(0x9e37, a.as_bytes());
            h = fnv1a(h, b.as_bytes());
            h = fnv1a(h, &((j - i) as u64).to_le_bytes());
            fp.set(h as usize);
        }
    }
}

fn hash_fragment(tag: u64, window: &[String]) -> usize {
    let mut h = fnv1a(tag, &[]);
    for token in window {
        h = fnv1a(h, token.as_bytes());
        h = fnv1a(h, &[0]);
    }
    h as usize
}

/// 64-bit FNV-1a, seeded so distinct fragment shapes land in distinct bit
/// populations.
fn fnv1a(seed: u64, bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
    let mut hash = FNV_OFFSET ^ seed.wrapping_mul(FNV_PRIME);
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for name in ["atompairs", "maccs", "morgan2", "morgan3", "rdkit", "topo"] {
            let kind: DescriptorKind = name.parse().unwrap();
            assert_eq!(kind.to_string(), name);
        }
    }

    #[test]
    fn unknown_kind_name_is_rejected() {
        let err = "morgan4".parse::<DescriptorKind>().unwrap_err();
        assert_eq!(err, ParseDescriptorKindError("morgan4".to_string()));
    }

    #[test]
    fn default_kind_is_morgan2() {
        assert_eq!(DescriptorKind::default(), DescriptorKind::Morgan2);
    }

    #[test]
    fn fingerprints_are_deterministic() {
        let calc = FingerprintCalculator::new(DescriptorKind::Morgan2);
        let a = calc.fingerprint("CC(=O)Oc1ccccc1C(=O)O").unwrap();
        let b = calc.fingerprint("CC(=O)Oc1ccccc1C(=O)O").unwrap();
        assert_eq!(a, b);
        assert!(a.count_ones() > 0);
    }

    #[test]
    fn widths_follow_the_kind() {
        let smiles = "CCO";
        for (kind, bits) in [
            (DescriptorKind::Maccs, 167),
            (DescriptorKind::Morgan2, 2048),
            (DescriptorKind::AtomPairs, 2048),
        ] {
            let fp = FingerprintCalculator::new(kind).fingerprint(smiles).unwrap();
            assert_eq!(fp.num_bits(), bits);
        }
    }

    #[test]
    fn different_molecules_differ_somewhere() {
        let calc = FingerprintCalculator::new(DescriptorKind::Rdkit);
        let ethanol = calc.fingerprint("CCO").unwrap();
        let benzene = calc.fingerprint("c1ccccc1").unwrap();
        assert_ne!(ethanol, benzene);
    }

    #[test]
    fn invalid_smiles_reports_the_offending_string() {
        let calc = FingerprintCalculator::new(DescriptorKind::Morgan2);
        let err = calc.fingerprint("not a smiles").unwrap_err();
        let DescriptorError::InvalidSmiles { smiles, .. } = err;
        assert_eq!(smiles, "not a smiles");
    }

    #[test]
    fn torsion_windows_need_four_atoms() {
        let calc = FingerprintCalculator::new(DescriptorKind::Topological);
        let fp = calc.fingerprint("CCO").unwrap();
        assert_eq!(fp.count_ones(), 0);
        let fp = calc.fingerprint("CCCO").unwrap();
        assert!(fp.count_ones() > 0);
    }
}
