use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

/// Irregular plural forms and the base form they reduce to.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("mice", "mouse"),
    ("lice", "louse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("oxen", "ox"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("appendices", "appendix"),
    ("phenomena", "phenomenon"),
    ("alumni", "alumnus"),
    ("crises", "crisis"),
    ("analyses", "analysis"),
    ("theses", "thesis"),
    ("diagnoses", "diagnosis"),
    ("hypotheses", "hypothesis"),
    ("wolves", "wolf"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("thieves", "thief"),
    ("selves", "self"),
    ("calves", "calf"),
    ("loaves", "loaf"),
    ("goes", "go"),
    ("heroes", "hero"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
    ("echoes", "echo"),
    ("vetoes", "veto"),
    ("gases", "gas"),
    ("buses", "bus"),
    ("bonuses", "bonus"),
    ("viruses", "virus"),
    ("campuses", "campus"),
    ("statuses", "status"),
    ("lenses", "lens"),
    ("biases", "bias"),
    ("aliases", "alias"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("zombies", "zombie"),
    ("rookies", "rookie"),
    ("calories", "calorie"),
    ("selfies", "selfie"),
    ("brownies", "brownie"),
    ("goalies", "goalie"),
    ("niches", "niche"),
    ("caches", "cache"),
    ("aches", "ache"),
    ("headaches", "headache"),
    ("avalanches", "avalanche"),
    ("focuses", "focus"),
    ("quizzes", "quiz"),
];

/// Words that end like a plural but are already in base form.
const INVARIANT_NOUNS: &[&str] = &[
    "news", "politics", "economics", "physics", "mathematics", "athletics", "ethics",
    "olympics", "series", "species", "means", "headquarters", "lens", "bias", "alias",
    "atlas", "canvas", "christmas", "texas", "kansas", "arkansas", "vegas", "always",
    "perhaps", "afterwards", "towards", "besides", "whereas", "sometimes", "thanks",
    "specimen", "abdomen", "semen", "stamen", "regimen", "acumen", "hymen", "yemen",
    "ramen", "omen", "chaos", "cosmos", "ethos", "kudos", "clothes", "pancreas",
    "dallas", "honduras", "caracas", "madras", "barbados", "lagos", "paris", "athens",
];

/// Stems that form `-man` compounds, so `<stem>men` reduces to `<stem>man`.
const MAN_COMPOUND_STEMS: &[&str] = &[
    "congress", "business", "police", "fire", "chair", "spokes", "sports", "gun",
    "fisher", "country", "fresh", "states", "law", "service", "noble", "sales",
    "crafts", "horse", "middle", "news", "camera", "anchor", "line", "door", "strong",
    "kins", "alder", "fore", "work", "sea", "trades", "handy", "show", "gentle",
    "council", "committee", "assembly", "jury", "hit", "bats", "weather",
];

lazy_static! {
    static ref IRREGULAR: HashMap<&'static str, &'static str> =
        IRREGULAR_NOUNS.iter().copied().collect();
    static ref INVARIANT: HashSet<&'static str> = INVARIANT_NOUNS
        .iter()
        .copied()
        .chain(IRREGULAR_NOUNS.iter().map(|(_, base)| *base))
        .collect();
    static ref MAN_COMPOUNDS: HashSet<&'static str> = MAN_COMPOUND_STEMS.iter().copied().collect();
}

const MAX_PASSES: usize = 4;

/// Dictionary-free English noun lemmatizer.
///
/// Reduces plural nouns to their singular base form using an exception table
/// followed by suffix rules. Every lemma it returns is a fixed point:
/// `lemmatize(lemmatize(w)) == lemmatize(w)`. Input is expected to be
/// lowercase ASCII; anything else passes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lemmatizer;

impl Lemmatizer {
    pub fn new() -> Self {
        Self
    }

    /// Returns the base form of `word`.
    pub fn lemmatize<'a>(&self, word: &'a str) -> Cow<'a, str> {
        let mut current = Cow::Borrowed(word);
        for _ in 0..MAX_PASSES {
            match reduce(&current) {
                Some(next) => current = Cow::Owned(next),
                None => break,
            }
        }
        current
    }
}

/// Applies one reduction step, or `None` when `word` is already a base form.
fn reduce(word: &str) -> Option<String> {
    if let Some(base) = IRREGULAR.get(word) {
        return Some((*base).to_string());
    }
    if word.len() <= 3 || INVARIANT.contains(word) || !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return None;
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return None;
    }
    if word.len() > 4 && word.ends_with("ies") {
        return Some(format!("{}y", &word[..word.len() - 3]));
    }
    if ["sses", "xes", "ches", "shes", "zzes"].iter().any(|suffix| word.ends_with(suffix)) {
        return Some(word[..word.len() - 2].to_string());
    }
    if let Some(stem) = word.strip_suffix("men") {
        // congresswomen -> congresswoman
        let compound = stem.strip_suffix("wo").unwrap_or(stem);
        if MAN_COMPOUNDS.contains(compound) {
            return Some(format!("{}man", stem));
        }
        return None;
    }
    if word.ends_with('s') {
        return Some(word[..word.len() - 1].to_string());
    }
    None
}
