use super::{Field, Form, FormErrors, Payload, Rule, Validator};

const NAME: Field = Field {
    name: "name",
    label: "Name",
    rules: &[
        Rule::required("Name is required"),
        Rule::between(2, 100).with_message("Name must be between 2 and 100 characters"),
    ],
};

const EMAIL: Field = Field {
    name: "email",
    label: "Email",
    rules: &[
        Rule::required("Email is required"),
        Rule::email("Please enter a valid email address"),
    ],
};

const SUBJECT: Field = Field {
    name: "subject",
    label: "Subject",
    rules: &[
        Rule::required("Subject is required"),
        Rule::between(5, 200).with_message("Subject must be between 5 and 200 characters"),
    ],
};

const MESSAGE: Field = Field {
    name: "message",
    label: "Message",
    rules: &[
        Rule::required("Message is required"),
        Rule::between(10, 1000).with_message("Message must be between 10 and 1000 characters"),
    ],
};

/// The contact page form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub newsletter: bool,
}

impl Form for ContactForm {
    fn validate(payload: &Payload) -> Result<Self, FormErrors> {
        let mut v = Validator::new(payload);
        let name = v.value(&NAME);
        let email = v.value(&EMAIL);
        let subject = v.value(&SUBJECT);
        let message = v.value(&MESSAGE);
        let newsletter = v.flag("newsletter");
        v.finish()?;

        Ok(Self {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            subject: subject.unwrap_or_default(),
            message: message.unwrap_or_default(),
            newsletter,
        })
    }
}

// The JSON endpoint only insists on presence and a well-formed address;
// messages name the raw key.
const API_FIELDS: [Field; 4] = [
    Field {
        name: "name",
        label: "name",
        rules: &[Rule::REQUIRED],
    },
    Field {
        name: "email",
        label: "email",
        rules: &[
            Rule::REQUIRED,
            Rule::email("Please enter a valid email address"),
        ],
    },
    Field {
        name: "subject",
        label: "subject",
        rules: &[Rule::REQUIRED],
    },
    Field {
        name: "message",
        label: "message",
        rules: &[Rule::REQUIRED],
    },
];

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl Form for ApiContactForm {
    fn validate(payload: &Payload) -> Result<Self, FormErrors> {
        let mut v = Validator::new(payload);
        let [name, email, subject, message] = API_FIELDS.map(|field| v.value(&field));
        v.finish()?;

        Ok(Self {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            subject: subject.unwrap_or_default(),
            message: message.unwrap_or_default(),
        })
    }
}
