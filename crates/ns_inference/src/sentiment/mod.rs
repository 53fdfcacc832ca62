use ns_core::SentimentModel;

/// Normalisation constant of the compound score, `sum / sqrt(sum² + ALPHA)`.
const ALPHA: f32 = 15.0;
/// Scale applied to a word preceded by a negation.
const NEGATION_SCALAR: f32 = -0.74;
/// Added to the magnitude of a word preceded by an intensifier.
const BOOSTER_INCREMENT: f32 = 0.293;
/// How many preceding tokens are checked for a negation.
const NEGATION_WINDOW: usize = 3;

const LEXICON: &[(&str, f32)] = &[
    // positive
    ("good", 1.9), ("great", 3.1), ("excellent", 2.7), ("strong", 2.3),
    ("gain", 2.4), ("gains", 2.4), ("growth", 2.2), ("grow", 2.1), ("grows", 2.1),
    ("profit", 1.8), ("profits", 1.8), ("profitable", 1.9), ("record", 1.2),
    ("success", 2.7), ("successful", 2.8), ("win", 2.8), ("wins", 2.7),
    ("surge", 1.8), ("surges", 1.8), ("soar", 2.0), ("soars", 2.0),
    ("rise", 1.4), ("rises", 1.4), ("rally", 1.7), ("boost", 1.7), ("boosts", 1.7),
    ("improve", 1.9), ("improved", 2.1), ("improves", 1.8), ("innovative", 1.9),
    ("breakthrough", 2.4), ("optimistic", 2.3), ("confident", 2.2), ("beat", 1.2),
    ("beats", 1.2), ("upgrade", 1.6), ("upgraded", 1.6), ("praise", 2.6),
    ("praised", 2.4), ("positive", 2.6), ("love", 3.2), ("best", 3.2),
    ("approve", 1.8), ("approved", 1.8), ("expand", 1.3), ("expands", 1.3),
    ("launch", 0.9), ("launches", 0.9), ("benefit", 2.0), ("benefits", 2.0),
    ("happy", 2.7), ("win-win", 2.9), ("fine", 0.8), ("thrive", 2.4), ("thrives", 2.4),
    // negative
    ("bad", -2.5), ("poor", -2.1), ("weak", -1.9), ("loss", -1.3), ("losses", -1.6),
    ("lose", -1.7), ("loses", -1.6), ("decline", -1.5), ("declines", -1.5),
    ("drop", -1.1), ("drops", -1.1), ("fall", -1.3), ("falls", -1.3), ("fell", -1.3),
    ("plunge", -2.0), ("plunges", -2.0), ("crash", -1.7), ("crashes", -1.7),
    ("fail", -2.5), ("fails", -2.3), ("failure", -2.3), ("lawsuit", -1.4),
    ("sue", -1.6), ("sued", -1.6), ("recall", -1.2), ("recalls", -1.2),
    ("fraud", -2.8), ("scandal", -2.6), ("crisis", -3.1), ("risk", -1.1),
    ("risks", -1.1), ("concern", -1.4), ("concerns", -1.4), ("fear", -2.2),
    ("fears", -2.2), ("warn", -1.4), ("warns", -1.4), ("cut", -1.1), ("cuts", -1.1),
    ("layoffs", -1.9), ("fired", -2.0), ("probe", -0.9), ("investigation", -0.8),
    ("downgrade", -1.6), ("downgraded", -1.6), ("slump", -1.9), ("slumps", -1.9),
    ("negative", -2.7), ("threat", -2.4), ("threatens", -2.2), ("worst", -3.1),
    ("hate", -2.7), ("angry", -2.3), ("crisis-hit", -2.6), ("delay", -1.3),
    ("delays", -1.3), ("fined", -1.7), ("penalty", -1.8),
    ("struggle", -1.6), ("struggles", -1.6), ("collapse", -2.6), ("problem", -1.7),
    ("problems", -1.7),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "nothing", "without", "cannot",
];

const BOOSTERS: &[&str] = &[
    "very", "extremely", "highly", "significantly", "sharply", "hugely",
    "incredibly", "really", "strongly", "deeply",
];

/// Lexicon scorer in the style of VADER: per-word valences, negation flips
/// and intensifiers, squashed into a compound score in `[-1, 1]`.
#[derive(Debug, Default, Clone)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn new() -> Self {
        Self
    }

    fn valence(word: &str) -> Option<f32> {
        LEXICON.iter().find(|(w, _)| *w == word).map(|(_, v)| *v)
    }

    fn is_negation(word: &str) -> bool {
        NEGATIONS.contains(&word) || word.ends_with("n't")
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '-'))
        .map(|t| t.trim_matches(|c: char| c == '\'' || c == '-').to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

impl SentimentModel for LexiconSentiment {
    fn name(&self) -> &str {
        "Lexicon"
    }

    fn score(&self, text: &str) -> f32 {
        let tokens = tokenize(text);
        let mut sum = 0.0f32;

        for (i, token) in tokens.iter().enumerate() {
            let Some(mut valence) = Self::valence(token) else {
                continue;
            };

            if i > 0 && BOOSTERS.contains(&tokens[i - 1].as_str()) {
                valence += BOOSTER_INCREMENT * valence.signum();
            }

            let window_start = i.saturating_sub(NEGATION_WINDOW);
            if tokens[window_start..i].iter().any(|t| Self::is_negation(t)) {
                valence *= NEGATION_SCALAR;
            }

            sum += valence;
        }

        if sum == 0.0 {
            return 0.0;
        }
        (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
    }
}
