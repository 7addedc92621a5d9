use super::{Field, Form, FormErrors, Payload, Rule, Validator};

const PROJECT_TYPE: Field = Field {
    name: "project_type",
    label: "Project Type",
    rules: &[Rule::REQUIRED, Rule::between(2, 50)],
};

const BUDGET: Field = Field {
    name: "budget",
    label: "Budget Range",
    rules: &[Rule::REQUIRED, Rule::between(2, 50)],
};

const TIMELINE: Field = Field {
    name: "timeline",
    label: "Timeline",
    rules: &[Rule::REQUIRED, Rule::between(2, 50)],
};

const DESCRIPTION: Field = Field {
    name: "description",
    label: "Project Description",
    rules: &[Rule::REQUIRED, Rule::between(20, 2000)],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInquiryForm {
    pub project_type: String,
    pub budget: String,
    pub timeline: String,
    pub description: String,
}

impl Form for ProjectInquiryForm {
    fn validate(payload: &Payload) -> Result<Self, FormErrors> {
        let mut v = Validator::new(payload);
        let project_type = v.value(&PROJECT_TYPE);
        let budget = v.value(&BUDGET);
        let timeline = v.value(&TIMELINE);
        let description = v.value(&DESCRIPTION);
        v.finish()?;

        Ok(Self {
            project_type: project_type.unwrap_or_default(),
            budget: budget.unwrap_or_default(),
            timeline: timeline.unwrap_or_default(),
            description: description.unwrap_or_default(),
        })
    }
}
