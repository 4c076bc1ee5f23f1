//! Scripted chat replies.
//!
//! Messages that contain a conversion phrase such as "100 usd to btc" are
//! answered by the engine. Anything else gets a canned reply chosen by
//! keyword.

use ratebridge_fx::conversion::parse_amount;
use ratebridge_fx::{ConversionEngine, ConversionRequest};

use crate::render::DISCLAIMER;

pub const WELCOME: &str =
    "Hello! How can I help you with cryptocurrencies or currency conversion today?";

const CONVERTER_HINT: &str = "You can use our Currency Converter tool to convert between \
    different currencies. Try asking something like \"100 USD to BTC\".";

const CRYPTO_BLURB: &str = "Our platform provides information on various cryptocurrencies \
    including Bitcoin, Ethereum, Solana, and more. Is there a specific cryptocurrency you're \
    interested in?";

const GREETING: &str =
    "Hello! How can I assist you with cryptocurrency information or currency conversion today?";

const FALLBACK: &str = "I'm not sure how to respond to that. Can you ask about \
    cryptocurrencies or currency conversion?";

const CONVERSION_WORDS: &[&str] = &["convert", "conversion", "converter", "exchange", "rate", "rates"];
const CRYPTO_WORDS: &[&str] = &[
    "bitcoin",
    "ethereum",
    "crypto",
    "cryptocurrency",
    "cryptocurrencies",
];
const GREETING_WORDS: &[&str] = &["hello", "hi", "hey"];
const LINK_WORDS: &[&str] = &["to", "in", "into"];

/// What a chat message asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// A concrete conversion.
    Convert(ConversionRequest),
    /// General conversion question.
    ConverterHelp,
    /// Question about crypto assets.
    Crypto,
    Greeting,
    Unknown,
}

/// Classify a message.
pub fn detect_intent(message: &str) -> Intent {
    let words = tokenize(message);

    if let Some(request) = conversion_phrase(&words) {
        return Intent::Convert(request);
    }

    let has_any = |keywords: &[&str]| words.iter().any(|w| keywords.contains(&w.as_str()));

    if has_any(CONVERSION_WORDS) {
        Intent::ConverterHelp
    } else if has_any(CRYPTO_WORDS) {
        Intent::Crypto
    } else if has_any(GREETING_WORDS) {
        Intent::Greeting
    } else {
        Intent::Unknown
    }
}

/// Answer a message.
pub fn respond(engine: &ConversionEngine, message: &str) -> String {
    match detect_intent(message) {
        Intent::Convert(request) => match engine.convert(&request) {
            Ok(result) => format!("{result}. {DISCLAIMER}."),
            Err(e) => {
                let msg = e.user_message();
                format!("{}: {}.", msg.title, msg.description)
            }
        },
        Intent::ConverterHelp => CONVERTER_HINT.to_string(),
        Intent::Crypto => CRYPTO_BLURB.to_string(),
        Intent::Greeting => GREETING.to_string(),
        Intent::Unknown => FALLBACK.to_string(),
    }
}

fn tokenize(message: &str) -> Vec<String> {
    message
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric() && c != '.' && c != '-')
                .trim_end_matches('.')
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Find `<amount> <code> (to|in|into) <code>` anywhere in the words.
fn conversion_phrase(words: &[String]) -> Option<ConversionRequest> {
    words.windows(4).find_map(|w| {
        let amount = parse_amount(&w[0]).ok()?;
        let is_code = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic());

        if is_code(&w[1]) && LINK_WORDS.contains(&w[2].as_str()) && is_code(&w[3]) {
            Some(ConversionRequest::new(amount, w[1].as_str(), w[3].as_str()))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratebridge_common::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_detects_conversion_phrase() {
        let intent = detect_intent("Can you convert 250.5 eur to BTC?");

        assert_eq!(
            intent,
            Intent::Convert(ConversionRequest::new(dec!(250.5), Currency::eur(), Currency::btc()))
        );
    }

    #[test]
    fn test_conversion_phrase_link_words() {
        assert!(matches!(detect_intent("what is 3 eth in usd"), Intent::Convert(_)));
        assert!(matches!(detect_intent("1e3 jpy into inr."), Intent::Convert(_)));
        assert!(matches!(detect_intent("turn -5 usd into eur"), Intent::Convert(_)));
    }

    #[test]
    fn test_keyword_replies() {
        assert_eq!(detect_intent("What are your exchange rates?"), Intent::ConverterHelp);
        assert_eq!(detect_intent("Tell me about Bitcoin"), Intent::Crypto);
        assert_eq!(detect_intent("hey there"), Intent::Greeting);
        assert_eq!(detect_intent("this is history"), Intent::Unknown);
        assert_eq!(detect_intent(""), Intent::Unknown);
    }

    #[test]
    fn test_conversion_wins_over_keywords() {
        assert!(matches!(
            detect_intent("hi, convert 1 btc to usd please"),
            Intent::Convert(_)
        ));
    }

    #[test]
    fn test_respond_with_conversion() {
        let engine = ConversionEngine::builtin();

        let reply = respond(&engine, "1000 usd to btc");

        assert_eq!(
            reply,
            "1000 USD = 0.01600000 BTC. Exchange rates are for demonstration purposes only."
        );
    }

    #[test]
    fn test_respond_with_error() {
        let engine = ConversionEngine::builtin();

        assert_eq!(
            respond(&engine, "5 usd to zzz"),
            "Unknown currency: ZZZ is not a supported currency."
        );
        assert_eq!(
            respond(&engine, "0 usd to eur"),
            "Invalid amount: Please enter a valid positive number."
        );
    }

    #[test]
    fn test_respond_canned() {
        let engine = ConversionEngine::builtin();

        assert_eq!(respond(&engine, "hello"), GREETING);
        assert_eq!(respond(&engine, "what's the weather"), FALLBACK);
    }
}
