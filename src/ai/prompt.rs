//! Prompt templates for the fitness coach.

use serde::Serialize;

use crate::data::model::{BmiResult, Measurement};

/// Soft length hint passed to the model; nothing enforces it locally.
pub const LENGTH_HINT: &str = "in about 150 characters";

/// Persona the model answers as.
pub const COACH_PERSONA: &str =
    "You are an experienced personal trainer and nutritionist. You speak with humor while staying professional.";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Builds the two-turn conversation sent for one submission: persona first, then the request.
pub fn advice_messages(measurement: &Measurement, bmi: &BmiResult) -> Vec<ChatMessage> {
    let request = format!(
        "My height is {}cm, my weight is {}kg, and my BMI is {}. \
         Please give me a brief evaluation, plus one concrete diet suggestion \
         and one concrete exercise suggestion, {}.",
        measurement.height_cm(),
        measurement.weight_kg(),
        bmi.display(),
        LENGTH_HINT,
    );

    vec![ChatMessage::system(COACH_PERSONA), ChatMessage::user(request)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_message_precedes_user_request() {
        let m = Measurement::new(170.0, 65.0).unwrap();
        let messages = advice_messages(&m, &m.bmi());

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, COACH_PERSONA);
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn user_request_embeds_measurements() {
        let m = Measurement::new(170.0, 65.0).unwrap();
        let messages = advice_messages(&m, &m.bmi());
        let request = &messages[1].content;

        assert!(request.contains("170"));
        assert!(request.contains("65"));
        assert!(request.contains("22.5"));
    }

    #[test]
    fn request_caps_length_in_characters() {
        let m = Measurement::new(170.0, 65.0).unwrap();
        let request = &advice_messages(&m, &m.bmi())[1].content;

        assert!(request.ends_with("in about 150 characters."));
        assert!(!request.contains("words"));
    }

    #[test]
    fn fractional_inputs_keep_their_decimals() {
        let m = Measurement::new(165.5, 58.25).unwrap();
        let request = &advice_messages(&m, &m.bmi())[1].content;

        assert!(request.contains("165.5cm"));
        assert!(request.contains("58.25kg"));
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_value(ChatMessage::system("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "system", "content": "hi"}));
    }
}
