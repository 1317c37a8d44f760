//! Noun lemmatization
//!
//! Reduces plural nouns to their dictionary base form, following WordNet's
//! noun morphology: irregular forms come from an exception table, regular
//! forms go through suffix detachment rules. Since there is no dictionary to
//! validate candidates against, each rule is guarded so that words which
//! merely look like plurals (`class`, `virus`, `analysis`...) are kept as-is.

use std::{borrow::Cow, collections::HashMap, sync::OnceLock};

/// Rule-based noun lemmatizer
#[derive(Clone, Copy, Debug)]
pub struct Lemmatizer {
    /// Irregular forms and their lemma
    exceptions: &'static HashMap<&'static str, &'static str>,
}
//
impl Lemmatizer {
    /// Set up the lemmatizer
    pub fn new() -> Self {
        Self {
            exceptions: exceptions(),
        }
    }

    /// Number of irregular forms known to this lemmatizer
    pub fn num_exceptions(&self) -> usize {
        self.exceptions.len()
    }

    /// Reduce a lowercase word to its base form
    pub fn lemmatize<'word>(&self, word: &'word str) -> Cow<'word, str> {
        if let Some(lemma) = self.exceptions.get(word) {
            return Cow::Borrowed(*lemma);
        }
        if INVARIANT.contains(&word) || word.chars().count() <= 3 {
            return Cow::Borrowed(word);
        }

        // Words ending like a singular are their own lemma
        if ["ss", "is", "us"].iter().any(|suffix| word.ends_with(suffix)) {
            return Cow::Borrowed(word);
        }

        // libraries -> library, but ties -> tie
        if let Some(stem) = word.strip_suffix("ies") {
            return if word.len() <= 4 {
                Cow::Borrowed(&word[..word.len() - 1])
            } else {
                Cow::Owned(format!("{stem}y"))
            };
        }

        // classes -> class, boxes -> box, matches -> match, viruses -> virus
        if let Some(stem) = word.strip_suffix("es") {
            let sibilant = ["ss", "x", "zz", "ch", "sh"]
                .iter()
                .any(|suffix| stem.ends_with(suffix));
            let latin = stem
                .strip_suffix("us")
                .is_some_and(|before| !before.is_empty() && !ends_with_vowel(before));
            if sibilant || latin {
                return Cow::Borrowed(stem);
            }
        }

        // firemen -> fireman
        if let Some(stem) = word.strip_suffix("men") {
            return Cow::Owned(format!("{stem}man"));
        }

        // languages -> language
        match word.strip_suffix('s') {
            Some(stem) => Cow::Borrowed(stem),
            None => Cow::Borrowed(word),
        }
    }
}
//
impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Truth that a word ends with an ASCII vowel
fn ends_with_vowel(word: &str) -> bool {
    word.chars()
        .next_back()
        .is_some_and(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
}

/// Irregular noun forms, keyed by inflected form
fn exceptions() -> &'static HashMap<&'static str, &'static str> {
    static LAZY: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    LAZY.get_or_init(|| EXCEPTIONS.iter().copied().collect())
}

/// Inflected form -> lemma
const EXCEPTIONS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("people", "people"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("oxen", "ox"),
    ("lives", "life"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("wolves", "wolf"),
    ("shelves", "shelf"),
    ("selves", "self"),
    ("thieves", "thief"),
    ("calves", "calf"),
    ("loaves", "loaf"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("appendices", "appendix"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("hypotheses", "hypothesis"),
    ("parentheses", "parenthesis"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("caches", "cache"),
    ("niches", "niche"),
    ("cliches", "cliche"),
    ("headaches", "headache"),
    ("movies", "movie"),
    ("cookies", "cookie"),
    ("zombies", "zombie"),
    ("newbies", "newbie"),
    ("rookies", "rookie"),
    ("selfies", "selfie"),
    ("techies", "techie"),
    ("goodies", "goodie"),
    ("hoodies", "hoodie"),
    ("freebies", "freebie"),
    ("calories", "calorie"),
    ("menus", "menu"),
    ("gurus", "guru"),
];

/// Words that look inflected but are their own lemma
const INVARIANT: &[&str] = &[
    "news",
    "series",
    "species",
    "always",
    "perhaps",
    "sometimes",
    "whereas",
    "physics",
    "mathematics",
    "economics",
    "politics",
    "ethics",
    "analytics",
    "lens",
    "alias",
    "bias",
    "canvas",
    "atlas",
    "christmas",
    "texas",
    "devops",
    "kubernetes",
    "jenkins",
    "postgres",
    "macos",
    "nodejs",
    "reactjs",
    "vuejs",
    "nextjs",
    "specimen",
    "abdomen",
    "omen",
    "amen",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(word: &str) -> String {
        Lemmatizer::new().lemmatize(word).into_owned()
    }

    #[test]
    fn regular_plurals() {
        assert_eq!(lemma("languages"), "language");
        assert_eq!(lemma("developers"), "developer");
        assert_eq!(lemma("libraries"), "library");
        assert_eq!(lemma("ties"), "tie");
        assert_eq!(lemma("classes"), "class");
        assert_eq!(lemma("boxes"), "box");
        assert_eq!(lemma("matches"), "match");
        assert_eq!(lemma("crashes"), "crash");
        assert_eq!(lemma("buzzes"), "buzz");
        assert_eq!(lemma("sizes"), "size");
        assert_eq!(lemma("releases"), "release");
        assert_eq!(lemma("viruses"), "virus");
        assert_eq!(lemma("causes"), "cause");
        assert_eq!(lemma("firemen"), "fireman");
    }

    #[test]
    fn irregular_plurals() {
        assert_eq!(lemma("women"), "woman");
        assert_eq!(lemma("children"), "child");
        assert_eq!(lemma("indices"), "index");
        assert_eq!(lemma("movies"), "movie");
        assert_eq!(lemma("wolves"), "wolf");
    }

    #[test]
    fn base_forms_are_kept() {
        for word in [
            "class", "virus", "analysis", "bus", "gas", "news", "always", "code", "java",
            "csharp", "hate", "love", "programming", "famous", "genius",
        ] {
            assert_eq!(lemma(word), word);
        }
    }

    #[test]
    fn lemmatization_is_idempotent() {
        for word in [
            "languages", "libraries", "classes", "boxes", "viruses", "causes", "women", "indices",
            "firemen", "apps", "movies", "matches", "sizes",
        ] {
            let once = lemma(word);
            assert_eq!(lemma(&once), once, "{word} -> {once} is not a fixed point");
        }
    }

    #[test]
    fn non_ascii_is_harmless() {
        assert_eq!(lemma("cafés"), "café");
        assert_eq!(lemma("naïve"), "naïve");
        assert_eq!(lemma(""), "");
    }
}
