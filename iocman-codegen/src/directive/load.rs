use iocman_core::parse_condition;

use super::DirectiveError;

/// One line of `DB.load`: `filename[, key=value]*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadDirective {
    pub file: String,
    pub conditions: Vec<(String, String)>,
}

impl LoadDirective {
    pub fn parse(line: &str) -> Result<Self, DirectiveError> {
        let mut parts = line.split(',');
        let file = parts.next().unwrap_or_default().trim();
        if file.is_empty() {
            return Err(DirectiveError::MissingFile);
        }

        let conditions = parts
            .map(|part| {
                parse_condition(part)
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .ok_or_else(|| DirectiveError::BadCondition(part.trim().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            file: file.to_string(),
            conditions,
        })
    }

    /// Render the substitution block for this directive.
    pub fn render_block(&self) -> String {
        let keys: Vec<&str> = self.conditions.iter().map(|(k, _)| k.as_str()).collect();
        let values: Vec<&str> = self.conditions.iter().map(|(_, v)| v.as_str()).collect();
        format!(
            "\nfile db/{} {{\n    pattern {{ {} }}\n        {{ {} }}\n}}\n",
            self.file,
            keys.join(", "),
            values.join(", ")
        )
    }
}
