//! Discount-code codec.
//!
//! A discount code issued by `CREATE` carries the redemption it was issued
//! for, so that `CANCELREDEEM` can later reverse that redemption from the
//! code alone. The wire format is:
//!
//! ```text
//! {L}{customer_id}{L}{batch_number}{L}{amount}{L}{transaction_id}{L}{card_number}{approval_code}
//! ```
//!
//! where every `{L}` is an independent, uniformly random uppercase ASCII
//! letter. Decoding splits the code at ASCII letters, so the round-trip only
//! holds for field values that contain no ASCII letters, and the card number
//! is always taken to be [`CARD_NUMBER_LEN`] characters long.

use rand::Rng;

/// Length of a gift-card number inside the last segment of a code.
pub const CARD_NUMBER_LEN: usize = 16;

/// Number of segments (letters plus values) in a well-formed code.
const SEGMENT_COUNT: usize = 10;

/// The redemption fields packed into a discount code, in wire order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeFields {
    pub customer_id: String,
    pub batch_number: String,
    pub amount: String,
    pub transaction_id: String,
    pub card_number: String,
    pub approval_code: String,
}

/// Errors produced while decoding a discount code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeError {
    #[error("discount code has {found} segments, expected at least {SEGMENT_COUNT}")]
    TooFewSegments { found: usize },
}

/// Encode `fields` with the thread-local RNG.
pub fn encode(fields: &CodeFields) -> String {
    encode_with(&mut rand::rng(), fields)
}

/// Encode `fields`, drawing separator letters from `rng`.
pub fn encode_with<R: Rng + ?Sized>(rng: &mut R, fields: &CodeFields) -> String {
    let card = format!("{}{}", fields.card_number, fields.approval_code);
    let parts = [
        fields.customer_id.as_str(),
        fields.batch_number.as_str(),
        fields.amount.as_str(),
        fields.transaction_id.as_str(),
        card.as_str(),
    ];

    parts.iter().fold(String::new(), |mut code, part| {
        code.push(random_letter(rng));
        code.push_str(part);
        code
    })
}

/// Recover the fields of a code produced by [`encode`].
pub fn decode(code: &str) -> Result<CodeFields, CodeError> {
    let segments = segments(code);
    if segments.len() < SEGMENT_COUNT {
        return Err(CodeError::TooFewSegments {
            found: segments.len(),
        });
    }

    let (card_number, approval_code) = split_card(segments[9]);
    Ok(CodeFields {
        customer_id: segments[1].to_owned(),
        batch_number: segments[3].to_owned(),
        amount: segments[5].to_owned(),
        transaction_id: segments[7].to_owned(),
        card_number: card_number.to_owned(),
        approval_code: approval_code.to_owned(),
    })
}

fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    char::from(rng.random_range(b'A'..=b'Z'))
}

/// Every ASCII letter is a segment of its own; every maximal run of other
/// characters is one segment.
fn segments(code: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut run_start = None;

    for (index, c) in code.char_indices() {
        if c.is_ascii_alphabetic() {
            if let Some(start) = run_start.take() {
                out.push(&code[start..index]);
            }
            out.push(&code[index..index + 1]);
        } else if run_start.is_none() {
            run_start = Some(index);
        }
    }
    if let Some(start) = run_start {
        out.push(&code[start..]);
    }

    out
}

fn split_card(segment: &str) -> (&str, &str) {
    match segment.char_indices().nth(CARD_NUMBER_LEN) {
        Some((index, _)) => segment.split_at(index),
        None => (segment, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample(customer_id: &str, amount: &str, approval_code: &str) -> CodeFields {
        CodeFields {
            customer_id: customer_id.to_owned(),
            batch_number: "10493".to_owned(),
            amount: amount.to_owned(),
            transaction_id: "8812".to_owned(),
            card_number: "7001234567890123".to_owned(),
            approval_code: approval_code.to_owned(),
        }
    }

    #[test]
    fn test_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        let cases = [
            sample("6730418250000", "250", "123456"),
            sample("1", "12.75", "9"),
            sample("42", "0.5", "00012345"),
            sample("98765432101234", "1000000", "4-88/1"),
        ];

        for fields in cases {
            for _ in 0..32 {
                let code = encode_with(&mut rng, &fields);
                assert_eq!(decode(&code), Ok(fields.clone()), "code {code}");
            }
        }
    }

    #[test]
    fn test_thread_rng_round_trip() {
        let fields = sample("555", "80", "777");
        assert_eq!(decode(&encode(&fields)), Ok(fields));
    }

    #[test]
    fn test_separators_are_uppercase_letters() {
        let mut rng = StdRng::seed_from_u64(1);
        let code = encode_with(&mut rng, &sample("5", "6", "7"));
        let letters: Vec<char> = code.chars().filter(|c| c.is_ascii_alphabetic()).collect();
        assert_eq!(letters.len(), 5);
        assert!(letters.iter().all(|c| c.is_ascii_uppercase()));
        assert!(code.chars().next().is_some_and(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_known_code() {
        let fields = decode("Q42B1C250D99X7001234567890123456").unwrap();
        assert_eq!(fields.customer_id, "42");
        assert_eq!(fields.batch_number, "1");
        assert_eq!(fields.amount, "250");
        assert_eq!(fields.transaction_id, "99");
        assert_eq!(fields.card_number, "7001234567890123");
        assert_eq!(fields.approval_code, "456");
    }

    #[test]
    fn test_short_card_segment_has_no_approval_code() {
        let fields = decode("Q42B1C250D99X70012").unwrap();
        assert_eq!(fields.card_number, "70012");
        assert_eq!(fields.approval_code, "");
    }

    #[test]
    fn test_too_few_segments() {
        assert_eq!(
            decode("Q42B1C250"),
            Err(CodeError::TooFewSegments { found: 6 })
        );
        assert_eq!(decode(""), Err(CodeError::TooFewSegments { found: 0 }));
    }

    #[test]
    fn test_lowercase_letters_also_split() {
        let fields = decode("q42b1c250d99x7001234567890123456").unwrap();
        assert_eq!(fields.transaction_id, "99");
    }
}
