use sitesearch::tokenizer::{normalize, Tokenizer};

#[test]
fn it_normalizes_and_stems() {
    let words = Tokenizer::default().tokenize("Running Runners RUN! The café's menu.");
    assert!(words.contains(&"runn".to_string()));
    assert!(words.contains(&"runner".to_string()));
    assert!(words.contains(&"run".to_string()));
    // accented letters are dropped rather than folded
    assert!(words.contains(&"caf".to_string()));
}

#[test]
fn it_filters_stopwords() {
    let words = Tokenizer::default().tokenize("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert!(words.contains(&"fox lazy".to_string()));
}

#[test]
fn it_drops_conversational_fillers() {
    let words = Tokenizer::default().tokenize("Hey please find fast cars");
    assert_eq!(words, vec!["find", "fast", "car", "find fast", "fast car"]);
}

#[test]
fn bigrams_follow_unigrams() {
    let words = Tokenizer::default().tokenize("alpha beta gamma");
    assert_eq!(words, vec!["alpha", "beta", "gamma", "alpha beta", "beta gamma"]);
}

#[test]
fn tokenization_is_deterministic() {
    let text = "Speedy Computers: my laptop is very fast and rapid.";
    let tokenizer = Tokenizer::default();
    assert_eq!(tokenizer.tokenize(text), tokenizer.tokenize(text));
}

#[test]
fn normalize_is_total() {
    for input in ["", "   ", "\t\n", "___", "ÀÉÎ", "a--b"] {
        let out = normalize(input);
        assert!(!out.starts_with(' ') && !out.ends_with(' '));
        assert!(!out.contains("  "));
    }
    assert_eq!(normalize("a--b"), "a b");
}
