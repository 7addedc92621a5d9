use super::{Field, Form, FormErrors, Payload, Rule, Validator};

const EMAIL: Field = Field {
    name: "email",
    label: "Email",
    rules: &[Rule::REQUIRED, Rule::EMAIL],
};

const NAME: Field = Field {
    name: "name",
    label: "Name",
    rules: &[Rule::Optional, Rule::at_most(100)],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsletterForm {
    pub email: String,
    pub name: Option<String>,
}

impl Form for NewsletterForm {
    fn validate(payload: &Payload) -> Result<Self, FormErrors> {
        let mut v = Validator::new(payload);
        let email = v.value(&EMAIL);
        let name = v.value(&NAME);
        v.finish()?;

        Ok(Self {
            email: email.unwrap_or_default(),
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_optional() {
        let form = NewsletterForm::validate(&Payload::from_pairs([("email", "a@b.co")])).unwrap();
        assert_eq!(form.name, None);

        let form =
            NewsletterForm::validate(&Payload::from_pairs([("email", "a@b.co"), ("name", " ")]))
                .unwrap();
        assert_eq!(form.name, None);
    }

    #[test]
    fn test_name_length_still_checked_when_present() {
        let long = "n".repeat(101);
        let errors = NewsletterForm::validate(&Payload::from_pairs([
            ("email", "a@b.co"),
            ("name", long.as_str()),
        ]))
        .unwrap_err();
        assert_eq!(
            errors.for_field("name"),
            Some("Name must be at most 100 characters")
        );
    }

    #[test]
    fn test_email_required_and_formatted() {
        let errors = NewsletterForm::validate(&Payload::default()).unwrap_err();
        assert_eq!(errors.for_field("email"), Some("Email is required"));

        let errors =
            NewsletterForm::validate(&Payload::from_pairs([("email", "not-an-email")])).unwrap_err();
        assert_eq!(
            errors.for_field("email"),
            Some("Email must be a valid email address")
        );
    }
}
