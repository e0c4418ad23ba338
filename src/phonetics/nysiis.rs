// The New York State Identification and Intelligence System phonetic key.
//
// The name is first rewritten at its boundaries (MAC, SCH, KN, PH...), then
// transduced left to right, one position at a time, by an ordered rule table
// where the first matching rule decides what gets appended to the key. A
// produced chunk is only appended when it differs from the last character
// currently in the key.
//
// Note that the H rule fires for every H, taking the previous input
// character. This differs from most published NYSIIS variants, which only
// do so when the H is not surrounded by vowels.
//
// Urls:
//   - https://en.wikipedia.org/wiki/New_York_State_Identification_and_Intelligence_System
//
use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;
use unidecode::unidecode;

use crate::error::NysiisError;

/// Length of a true NYSIIS key.
pub const NYSIIS_KEY_LENGTH: usize = 6;

// Groups are applied in order, first match wins within a group.
static PREFIXES: &[&[(&str, &str)]] = &[
    &[(r"^MAC", "MCC"), (r"^SCH", "SSS")],
    &[(r"^KN", "NN"), (r"^P[HF]", "FF")],
    &[(r"^K", "C")],
];

static SUFFIXES: &[&[(&str, &str)]] = &[&[
    (r"(?:EE|IE)$", "Y"),
    (r"(?:DT|RT|RD|NT|ND)$", "D"),
]];

type RuleGroups = Vec<Vec<(Regex, &'static str)>>;

fn compile(groups: &[&[(&str, &'static str)]]) -> RuleGroups {
    groups
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
                .collect()
        })
        .collect()
}

lazy_static! {
    static ref PREFIX_RULES: RuleGroups = compile(PREFIXES);
    static ref SUFFIX_RULES: RuleGroups = compile(SUFFIXES);
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'A' | 'E' | 'I' | 'O' | 'U')
}

fn rewrite(word: String, groups: &RuleGroups) -> String {
    groups.iter().fold(word, |word, group| {
        match group.iter().find(|(pattern, _)| pattern.is_match(&word)) {
            Some((pattern, replacement)) => pattern.replace(&word, *replacement).into_owned(),
            None => word,
        }
    })
}

// NOTE: the word is ASCII, so byte positions are character positions.
struct Window<'a> {
    word: &'a str,
    position: usize,
}

impl Window<'_> {
    fn current(&self) -> char {
        self.word.as_bytes()[self.position] as char
    }

    fn previous(&self) -> char {
        self.word.as_bytes()[self.position - 1] as char
    }

    // There must remain at least one character after the pattern.
    fn lookahead(&self, pattern: &str) -> bool {
        self.position + pattern.len() < self.word.len()
            && self.word[self.position..].starts_with(pattern)
    }
}

enum Emit {
    Literal(&'static str),
    Previous,
}

impl Emit {
    fn resolve<'a>(&self, window: &Window<'a>) -> &'a str {
        match self {
            Self::Literal(chunk) => *chunk,
            Self::Previous => &window.word[window.position - 1..window.position],
        }
    }
}

struct Rule {
    applies: fn(&Window) -> bool,
    emit: Emit,
}

// When no rule applies, the current character is emitted as is.
static RULES: [Rule; 11] = [
    Rule {
        applies: |w| w.lookahead("EV"),
        emit: Emit::Literal("AF"),
    },
    Rule {
        applies: |w| is_vowel(w.current()),
        emit: Emit::Literal("A"),
    },
    Rule {
        applies: |w| w.current() == 'Q',
        emit: Emit::Literal("G"),
    },
    Rule {
        applies: |w| w.current() == 'Z',
        emit: Emit::Literal("S"),
    },
    Rule {
        applies: |w| w.current() == 'M',
        emit: Emit::Literal("N"),
    },
    Rule {
        applies: |w| w.lookahead("KN"),
        emit: Emit::Literal("N"),
    },
    Rule {
        applies: |w| w.current() == 'K',
        emit: Emit::Literal("C"),
    },
    Rule {
        applies: |w| w.lookahead("SCH"),
        emit: Emit::Literal("SSS"),
    },
    Rule {
        applies: |w| w.lookahead("PH"),
        emit: Emit::Literal("FF"),
    },
    Rule {
        applies: |w| {
            w.current() == 'H' && (!is_vowel(w.previous()) || !is_vowel(w.current()))
        },
        emit: Emit::Previous,
    },
    Rule {
        applies: |w| w.current() == 'W' && is_vowel(w.previous()),
        emit: Emit::Literal("A"),
    },
];

fn transduce(word: &str) -> String {
    let mut key = String::with_capacity(word.len());

    // The first character seeds the key and is never translated
    key.push_str(&word[..1]);

    for position in 1..word.len() {
        let window = Window { word, position };

        let produced = RULES
            .iter()
            .find(|rule| (rule.applies)(&window))
            .map_or(&word[position..=position], |rule| rule.emit.resolve(&window));

        if &key[key.len() - 1..] != produced {
            key.push_str(produced);
        }
    }

    key
}

fn clean_trailing(key: &mut String) {
    if key.len() > 1 && key.ends_with('S') {
        key.pop();
    } else if key.ends_with("AY") {
        key.truncate(key.len() - 2);
        key.push('Y');
    } else if key.len() > 1 && key.ends_with('A') {
        key.pop();
    }
}

/// Computes the NYSIIS key of the given name.
///
/// When `truncate` is true, the key is cut to [`NYSIIS_KEY_LENGTH`]
/// characters (true NYSIIS), else the full extended key is returned.
///
/// The name is transliterated to ASCII and uppercased beforehand, and must
/// then be at least 3 characters long.
pub fn nysiis(name: &str, truncate: bool) -> Result<String, NysiisError> {
    let normalized = unidecode(name).to_ascii_uppercase();

    if normalized.len() < 3 {
        return Err(NysiisError::InvalidInput {
            name: name.to_string(),
            len: normalized.len(),
        });
    }

    let word = rewrite(rewrite(normalized, &PREFIX_RULES), &SUFFIX_RULES);

    let mut key = transduce(&word);

    trace!(name, word = %word, key = %key, "transduced name");

    clean_trailing(&mut key);

    if truncate && key.len() > NYSIIS_KEY_LENGTH {
        key.truncate(NYSIIS_KEY_LENGTH);
    }

    Ok(key)
}
