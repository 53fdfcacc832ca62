use ns_core::{
    Article, ComparativeResult, CoverageDifference, Sentiment, SentimentDistribution,
    TopicOverlap, UniqueTopics, Verdict,
};

pub const NO_COMMON_TOPICS: &str = "No common topics";
pub const NO_UNIQUE_TOPICS_FIRST: &str = "No unique topics in Article 1";
pub const NO_UNIQUE_TOPICS_SECOND: &str = "No unique topics in Article 2";
pub const NOT_ENOUGH_ARTICLES: &str = "Not enough articles to compare";

const SIMILAR_THEMES: &str = "Both articles cover similar themes.";
const DIFFERENT_ASPECTS: &str =
    "The articles focus on different aspects, offering a broader perspective.";
const POSITIVE_TO_NEGATIVE: &str =
    " The first article is positive while the second is negative, showing a divergence in sentiment.";
const NEGATIVE_TO_POSITIVE: &str =
    " The first article is negative while the second is positive, showing a divergence in sentiment.";

/// Builds the cross-article comparison for an ordered batch of tagged articles.
pub fn compare(articles: &[Article]) -> ComparativeResult {
    let distribution = sentiment_distribution(articles);
    ComparativeResult {
        distribution,
        coverage_differences: coverage_differences(articles),
        topic_overlap: topic_overlap(articles),
        unique_topics: unique_topics(articles),
        verdict: verdict(&distribution),
    }
}

pub fn sentiment_distribution(articles: &[Article]) -> SentimentDistribution {
    articles.iter().map(|a| a.sentiment).collect()
}

/// One entry per adjacent pair, in batch order.
pub fn coverage_differences(articles: &[Article]) -> Vec<CoverageDifference> {
    articles
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let (first, second) = (&pair[0], &pair[1]);
            let comparison = format!(
                "Article {} highlights \"{}\", while Article {} discusses \"{}\".",
                i + 1,
                first.title,
                i + 2,
                second.title
            );

            let shares_topic = first.topics.iter().any(|t| second.topics.contains(t));
            let mut impact = if shares_topic {
                SIMILAR_THEMES.to_string()
            } else {
                DIFFERENT_ASPECTS.to_string()
            };
            match (first.sentiment, second.sentiment) {
                (Sentiment::Positive, Sentiment::Negative) => impact.push_str(POSITIVE_TO_NEGATIVE),
                (Sentiment::Negative, Sentiment::Positive) => impact.push_str(NEGATIVE_TO_POSITIVE),
                _ => {}
            }

            CoverageDifference { comparison, impact }
        })
        .collect()
}

/// Set comparison between the first two articles only.
pub fn topic_overlap(articles: &[Article]) -> TopicOverlap {
    let (first, second) = match articles {
        [first, second, ..] => (first, second),
        _ => {
            return TopicOverlap {
                common: vec![NOT_ENOUGH_ARTICLES.to_string()],
                unique_to_first: Vec::new(),
                unique_to_second: Vec::new(),
            }
        }
    };

    let common = difference_or_intersection(&first.topics, &second.topics, true);
    let unique_to_first = difference_or_intersection(&first.topics, &second.topics, false);
    let unique_to_second = difference_or_intersection(&second.topics, &first.topics, false);

    TopicOverlap {
        common: or_placeholder(common, NO_COMMON_TOPICS),
        unique_to_first: or_placeholder(unique_to_first, NO_UNIQUE_TOPICS_FIRST),
        unique_to_second: or_placeholder(unique_to_second, NO_UNIQUE_TOPICS_SECOND),
    }
}

fn difference_or_intersection(left: &[String], right: &[String], keep_shared: bool) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for topic in left {
        if right.contains(topic) == keep_shared && !out.contains(topic) {
            out.push(topic.clone());
        }
    }
    out
}

fn or_placeholder(topics: Vec<String>, placeholder: &str) -> Vec<String> {
    if topics.is_empty() {
        vec![placeholder.to_string()]
    } else {
        topics
    }
}

/// Topics of each article that no other article in the batch carries.
pub fn unique_topics(articles: &[Article]) -> UniqueTopics {
    let mut unique = UniqueTopics::default();
    for (i, article) in articles.iter().enumerate() {
        let topics: Vec<String> = article
            .topics
            .iter()
            .filter(|topic| {
                !articles
                    .iter()
                    .enumerate()
                    .any(|(j, other)| j != i && other.topics.contains(topic))
            })
            .cloned()
            .collect();
        if !topics.is_empty() {
            unique.insert(i + 1, topics);
        }
    }
    unique
}

/// Positive only when it strictly outnumbers Negative; ties go to Negative.
pub fn verdict(distribution: &SentimentDistribution) -> Verdict {
    if distribution.positive > distribution.negative {
        Verdict::MostlyPositive
    } else {
        Verdict::MostlyNegative
    }
}
