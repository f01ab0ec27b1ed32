use newscat::{AuthorNormalizer, Lemmatizer, StopWords, TextNormalizer, UNKNOWN_AUTHOR};

const SAMPLES: [&str; 6] = [
    "Senate Passes New Bill!",
    "Lawmakers voted today on the 2023 budget...",
    "Stock markets RALLY as investors cheer; prices climb 3%",
    "The movies were shown at festivals in cities across the world",
    "",
    "!!! ??? 42",
];

#[test]
fn test_text_output_shape() {
    let normalizer = TextNormalizer::new();
    let stop_words = StopWords::english();

    for sample in SAMPLES {
        let cleaned = normalizer.normalize(sample);
        assert!(!cleaned.starts_with(' ') && !cleaned.ends_with(' '));
        assert!(!cleaned.contains("  "));
        for token in cleaned.split(' ').filter(|t| !t.is_empty()) {
            assert!(token.len() > 1, "{:?} from {:?}", token, sample);
            assert!(token.chars().all(|c| c.is_ascii_lowercase()), "{:?} from {:?}", token, sample);
            assert!(!stop_words.contains(token), "{:?} from {:?}", token, sample);
        }
    }
}

#[test]
fn test_text_examples() {
    let normalizer = TextNormalizer::new();
    assert_eq!(normalizer.normalize("Senate Passes New Bill"), "senate pass new bill");
    assert_eq!(normalizer.normalize("Lawmakers voted today on..."), "lawmaker voted today");
    assert_eq!(
        normalizer.normalize("The movies were shown at festivals in cities"),
        "movie shown festival city"
    );
    assert_eq!(normalizer.normalize("!!! ??? 42"), "");
    assert_eq!(normalizer.normalize("Yemen ceasefire talks"), "yemen ceasefire talk");
    assert_eq!(normalizer.normalize("Chaos in Dallas as quizzes change focuses"), "chaos dallas quiz change focus");
}

#[test]
fn test_text_idempotent() {
    let normalizer = TextNormalizer::new();
    for sample in SAMPLES {
        let once = normalizer.normalize(sample);
        assert_eq!(normalizer.normalize(&once), once);
    }
}

#[test]
fn test_lemmatizer() {
    let lemmatizer = Lemmatizer::new();
    assert_eq!(lemmatizer.lemmatize("cities"), "city");
    assert_eq!(lemmatizer.lemmatize("women"), "woman");
    assert_eq!(lemmatizer.lemmatize("news"), "news");
    assert_eq!(lemmatizer.lemmatize("vote"), "vote");
}

#[test]
fn test_author_examples() {
    let normalizer = AuthorNormalizer::new();
    assert_eq!(normalizer.normalize("None of the above"), UNKNOWN_AUTHOR);
    assert_eq!(normalizer.normalize("By JOHN SMITH, Reuters"), "John Smith");
    assert_eq!(normalizer.normalize("Lee Moran and Ed Mazza"), "Lee Moran");
    assert_eq!(normalizer.normalize("ron_dicker"), "Ron Dicker");
    assert_eq!(normalizer.normalize("Ed"), UNKNOWN_AUTHOR);
    assert_eq!(normalizer.normalize("User #1234"), UNKNOWN_AUTHOR);
    assert_eq!(normalizer.normalize(""), UNKNOWN_AUTHOR);
}

#[test]
fn test_author_output_shape() {
    let normalizer = AuthorNormalizer::new();
    let inputs = [
        "Sara Boboltz (Senior Reporter)",
        "BY RYAN GRENOBLE",
        "\"Jane O'Neil\"",
        "Mary-Kate Smith, Staff Writer",
        "Andrew Smith",
        "12345",
    ];
    for raw in inputs {
        let name = normalizer.normalize(raw);
        if name == UNKNOWN_AUTHOR {
            continue;
        }
        assert!(name.len() >= 5, "{:?} from {:?}", name, raw);
        assert!(!name.chars().any(|c| c.is_ascii_digit() || c == '#'));
        assert!(name.chars().any(|c| c.is_ascii_lowercase()));
        for word in name.split(' ') {
            assert!(word.chars().next().map_or(false, char::is_uppercase), "{:?}", name);
        }
    }
}

#[test]
fn test_author_idempotent_on_clean_names() {
    let normalizer = AuthorNormalizer::new();
    for name in ["John Smith", "Sara Boboltz", "Ryan Grenoble"] {
        assert_eq!(normalizer.normalize(name), name);
    }
}
