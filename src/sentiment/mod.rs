//! Headline sentiment classification
//!
//! Lexicon-based compound polarity scoring tuned for equities news
//! headlines. Deterministic, no IO, always returns a label.

use std::collections::HashMap;
use std::fmt;

/// Three-way sentiment label for a headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn emoji(&self) -> &'static str {
        match self {
            Sentiment::Positive => "🟢",
            Sentiment::Negative => "🔴",
            Sentiment::Neutral => "⚪",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        };
        write!(f, "{}", name)
    }
}

/// Lexicon-based sentiment analyzer.
pub struct SentimentAnalyzer {
    /// Word-level polarity scores
    lexicon: HashMap<String, f64>,
    /// Intensity modifiers (very, sharply, etc.)
    boosters: HashMap<String, f64>,
    /// Negation words
    negations: Vec<String>,
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        let mut analyzer = Self {
            lexicon: HashMap::new(),
            boosters: HashMap::new(),
            negations: Vec::new(),
        };
        analyzer.init_lexicons();
        analyzer
    }

    fn init_lexicons(&mut self) {
        let positive_words = [
            ("record", 0.5),
            ("profit", 0.6),
            ("profits", 0.6),
            ("profitable", 0.6),
            ("beat", 0.6),
            ("beats", 0.6),
            ("exceeds", 0.5),
            ("tops", 0.5),
            ("surge", 0.7),
            ("surges", 0.7),
            ("soars", 0.8),
            ("soar", 0.8),
            ("rally", 0.6),
            ("rallies", 0.6),
            ("jump", 0.5),
            ("jumps", 0.5),
            ("gain", 0.5),
            ("gains", 0.5),
            ("rises", 0.4),
            ("rise", 0.4),
            ("rising", 0.4),
            ("climbs", 0.4),
            ("growth", 0.5),
            ("grows", 0.4),
            ("upgrade", 0.6),
            ("upgrades", 0.6),
            ("upgraded", 0.6),
            ("outperform", 0.5),
            ("buy", 0.3),
            ("bullish", 0.7),
            ("approval", 0.6),
            ("approves", 0.6),
            ("approved", 0.6),
            ("acquisition", 0.3),
            ("acquires", 0.3),
            ("merger", 0.3),
            ("partnership", 0.4),
            ("expands", 0.4),
            ("expansion", 0.4),
            ("dividend", 0.3),
            ("buyback", 0.4),
            ("raises", 0.4),
            ("raised", 0.4),
            ("strong", 0.5),
            ("breakthrough", 0.6),
            ("wins", 0.6),
            ("win", 0.6),
            ("success", 0.7),
            ("successful", 0.7),
            ("positive", 0.5),
            ("upbeat", 0.5),
            ("momentum", 0.3),
            ("high", 0.3),
            ("higher", 0.4),
        ];

        let negative_words = [
            ("loss", -0.6),
            ("losses", -0.6),
            ("miss", -0.5),
            ("misses", -0.5),
            ("missed", -0.5),
            ("plunge", -0.7),
            ("plunges", -0.7),
            ("plummets", -0.8),
            ("tumbles", -0.6),
            ("sinks", -0.6),
            ("slides", -0.5),
            ("slumps", -0.6),
            ("drop", -0.4),
            ("drops", -0.4),
            ("falls", -0.4),
            ("fall", -0.4),
            ("falling", -0.4),
            ("decline", -0.4),
            ("declines", -0.4),
            ("downgrade", -0.6),
            ("downgrades", -0.6),
            ("downgraded", -0.6),
            ("underperform", -0.5),
            ("sell", -0.3),
            ("selloff", -0.6),
            ("bearish", -0.7),
            ("warning", -0.4),
            ("warns", -0.4),
            ("cut", -0.4),
            ("cuts", -0.4),
            ("layoffs", -0.6),
            ("lawsuit", -0.6),
            ("sues", -0.5),
            ("probe", -0.5),
            ("investigation", -0.5),
            ("fraud", -0.9),
            ("scandal", -0.7),
            ("bankruptcy", -0.9),
            ("bankrupt", -0.9),
            ("default", -0.7),
            ("recall", -0.6),
            ("recalls", -0.6),
            ("halts", -0.5),
            ("halted", -0.5),
            ("delisted", -0.7),
            ("weak", -0.5),
            ("disappointing", -0.6),
            ("disappoints", -0.6),
            ("fears", -0.5),
            ("fear", -0.5),
            ("crash", -0.7),
            ("crashes", -0.7),
            ("negative", -0.5),
            ("low", -0.3),
            ("lower", -0.4),
            ("risk", -0.3),
            ("risks", -0.3),
            ("debt", -0.3),
            ("shortfall", -0.5),
        ];

        for (word, score) in positive_words.iter().chain(negative_words.iter()) {
            self.lexicon.insert(word.to_string(), *score);
        }

        let boosters = [
            ("very", 1.3),
            ("really", 1.3),
            ("extremely", 1.5),
            ("sharply", 1.4),
            ("significantly", 1.3),
            ("massively", 1.4),
            ("hugely", 1.4),
            ("historic", 1.3),
            ("major", 1.2),
            ("surprise", 1.2),
            ("unexpectedly", 1.3),
        ];

        for (word, factor) in boosters {
            self.boosters.insert(word.to_string(), factor);
        }

        self.negations = [
            "not", "no", "never", "none", "isn't", "aren't", "wasn't", "weren't", "doesn't",
            "don't", "didn't", "won't", "can't", "cannot", "couldn't", "fails", "without",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
    }

    /// Compound polarity score in [-1, 1].
    pub fn compound(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower.split_whitespace().collect();

        let mut scores: Vec<f64> = Vec::new();
        for (i, word) in words.iter().enumerate() {
            let cleaned = clean_word(word);
            if let Some(&score) = self.lexicon.get(&cleaned) {
                scores.push(self.apply_modifiers(&words, i, score));
            }
        }

        if scores.is_empty() {
            return 0.0;
        }

        normalize(scores.iter().sum())
    }

    /// Map headline text to a three-way label: compound >= +0.05 is
    /// Positive, <= -0.05 is Negative, otherwise Neutral.
    pub fn classify(&self, text: &str) -> Sentiment {
        let compound = self.compound(text);
        if compound >= 0.05 {
            Sentiment::Positive
        } else if compound <= -0.05 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// Apply boosters and negations from up to 3 preceding words.
    fn apply_modifiers(&self, words: &[&str], index: usize, mut score: f64) -> f64 {
        let start = index.saturating_sub(3);

        for word in &words[start..index] {
            let prev = clean_word(word);

            if let Some(&factor) = self.boosters.get(&prev) {
                score *= factor;
            }

            if self.negations.contains(&prev) {
                score *= -0.5; // Flip and dampen
            }
        }

        score.clamp(-1.0, 1.0)
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'' || *c == '-')
        .collect::<String>()
        .to_lowercase()
}

fn normalize(score: f64) -> f64 {
    let alpha = 15.0;
    score / (score.abs() + alpha).sqrt()
}
