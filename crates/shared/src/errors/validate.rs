use validator::ValidationErrors;

fn describe(code: &str) -> &'static str {
    match code {
        "length" => "invalid length",
        "range" => "value out of range",
        "required" => "required",
        _ => "invalid value",
    }
}

/// One `field: message` entry per failed rule, sorted by field name.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| describe(err.code.as_ref()).to_string());
                format!("{field}: {message}")
            })
        })
        .collect();
    messages.sort();
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(range(min = 1, max = 3, message = "count must be between 1 and 3"))]
        count: u32,
        #[validate(length(min = 1))]
        bins: Vec<String>,
    }

    #[test]
    fn messages_name_the_field() {
        let errors = Probe {
            count: 9,
            bins: vec![],
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            validation_messages(&errors),
            ["bins: invalid length", "count: count must be between 1 and 3"]
        );
    }
}
