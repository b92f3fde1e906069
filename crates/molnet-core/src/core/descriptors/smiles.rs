use thiserror::Error;

/// Reasons a SMILES string fails the syntactic scan.
///
/// The scan checks parseability only: character legality, balanced branches
/// and brackets, and paired ring-closure digits. Chemical validity (valence,
/// aromaticity, stereochemistry) is not judged here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SmilesSyntaxError {
    #[error("string is empty")]
    Empty,
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("unbalanced branch parentheses")]
    UnbalancedParentheses,
    #[error("unclosed bracket atom")]
    UnclosedBracket,
    #[error("bracket atom is empty")]
    EmptyBracket,
    #[error("ring-closure bond {0} is not paired")]
    UnpairedRingBond(String),
    #[error("'%' must be followed by two digits")]
    TruncatedRingBond,
}

const BOND_CHARS: &[char] = &['-', '=', '#', '$', ':', '/', '\\', '~'];

fn is_organic_atom(c: char) -> bool {
    matches!(
        c,
        'B' | 'C' | 'N' | 'O' | 'P' | 'S' | 'F' | 'I' | 'b' | 'c' | 'n' | 'o' | 'p' | 's' | '*'
    )
}

/// Scans a SMILES string into its sequence of atom tokens.
///
/// Returns the atoms in writing order: organic-subset symbols (including the
/// two-letter `Cl` and `Br`), aromatic lowercase symbols, and the contents of
/// bracket atoms. Ring-closure digits, bond symbols, branch parentheses and
/// dot separators are validated and consumed but produce no token.
pub(crate) fn scan_atoms(smiles: &str) -> Result<Vec<String>, SmilesSyntaxError> {
    if smiles.is_empty() {
        return Err(SmilesSyntaxError::Empty);
    }

    let mut atoms = Vec::new();
    let mut depth = 0usize;
    // ring-closure labels currently open, keyed by their digit string
    let mut open_rings: Vec<String> = Vec::new();
    let chars: Vec<char> = smiles.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '[' => {
                let close = chars[i + 1..]
                    .iter()
                    .position(|&c| c == ']')
                    .ok_or(SmilesSyntaxError::UnclosedBracket)?;
                if close == 0 {
                    return Err(SmilesSyntaxError::EmptyBracket);
                }
                let inner: String = chars[i + 1..i + 1 + close].iter().collect();
                if let Some(bad) = inner
                    .chars()
                    .find(|&c| !(c.is_ascii_alphanumeric() || matches!(c, '@' | '+' | '-' | '*')))
                {
                    return Err(SmilesSyntaxError::UnexpectedCharacter(bad));
                }
                atoms.push(inner);
                i += close + 2;
            }
            ']' => return Err(SmilesSyntaxError::UnexpectedCharacter(']')),
            '(' => {
                depth += 1;
                i += 1;
            }
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(SmilesSyntaxError::UnbalancedParentheses)?;
                i += 1;
            }
            '%' => {
                if i + 2 >= chars.len()
                    || !chars[i + 1].is_ascii_digit()
                    || !chars[i + 2].is_ascii_digit()
                {
                    return Err(SmilesSyntaxError::TruncatedRingBond);
                }
                toggle_ring(&mut open_rings, chars[i + 1..=i + 2].iter().collect());
                i += 3;
            }
            '0'..='9' => {
                toggle_ring(&mut open_rings, c.to_string());
                i += 1;
            }
            '.' => {
                i += 1;
            }
            c if BOND_CHARS.contains(&c) => {
                i += 1;
            }
            'C' if chars.get(i + 1) == Some(&'l') => {
                atoms.push("Cl".to_string());
                i += 2;
            }
            'B' if chars.get(i + 1) == Some(&'r') => {
                atoms.push("Br".to_string());
                i += 2;
            }
            c if is_organic_atom(c) => {
                atoms.push(c.to_string());
                i += 1;
            }
            c => return Err(SmilesSyntaxError::UnexpectedCharacter(c)),
        }
    }

    if depth != 0 {
        return Err(SmilesSyntaxError::UnbalancedParentheses);
    }
    if let Some(label) = open_rings.into_iter().next() {
        return Err(SmilesSyntaxError::UnpairedRingBond(label));
    }
    Ok(atoms)
}

fn toggle_ring(open_rings: &mut Vec<String>, label: String) {
    if let Some(pos) = open_rings.iter().position(|l| *l == label) {
        open_rings.remove(pos);
    } else {
        open_rings.push(label);
    }
}
