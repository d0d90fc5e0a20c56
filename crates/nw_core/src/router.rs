use crate::types::BrokerKind;

pub const SNS_TOPIC_PREFIX: &str = "arn:aws:sns:";
pub const SQS_QUEUE_PREFIXES: [&str; 2] = ["https://sqs.", "http://sqs."];

/// Classifies a broker reference by its prefix. Case-sensitive; the topic
/// check runs first.
pub fn classify(reference: &str) -> BrokerKind {
    if reference.starts_with(SNS_TOPIC_PREFIX) {
        BrokerKind::Topic
    } else if SQS_QUEUE_PREFIXES.iter().any(|prefix| reference.starts_with(prefix)) {
        BrokerKind::Queue
    } else {
        BrokerKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sns_arn_is_topic() {
        assert_eq!(classify("arn:aws:sns:x"), BrokerKind::Topic);
        assert_eq!(
            classify("arn:aws:sns:us-east-1:123456789012:guardian_content"),
            BrokerKind::Topic
        );
    }

    #[test]
    fn test_sqs_urls_are_queues() {
        assert_eq!(classify("https://sqs.y/z"), BrokerKind::Queue);
        assert_eq!(classify("http://sqs.y/z"), BrokerKind::Queue);
        assert_eq!(
            classify("https://sqs.us-east-1.amazonaws.com/123456789012/queue-name"),
            BrokerKind::Queue
        );
    }

    #[test]
    fn test_everything_else_is_unknown() {
        assert_eq!(classify("ftp://other"), BrokerKind::Unknown);
        assert_eq!(classify(""), BrokerKind::Unknown);
        assert_eq!(classify("invalid-reference"), BrokerKind::Unknown);
        assert_eq!(classify("ARN:AWS:SNS:x"), BrokerKind::Unknown);
        assert_eq!(classify("HTTPS://SQS.y/z"), BrokerKind::Unknown);
        assert_eq!(classify(" arn:aws:sns:x"), BrokerKind::Unknown);
    }

    #[test]
    fn test_classify_is_deterministic() {
        for reference in ["arn:aws:sns:x", "https://sqs.y/z", "ftp://other"] {
            assert_eq!(classify(reference), classify(reference));
        }
    }
}
