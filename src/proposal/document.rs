//! Parsing of external proposal replies.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ProposalError;
use crate::validation::ProposedAssignment;

/// The structured part of an external reply.
///
/// Only the outer shape is strict. Each entry of `assignments` is read with
/// [`ProposedAssignment::from_value`], so a bad entry is left for the
/// validator to reject on its own. Non-string warnings keep their JSON text.
///
/// ```json
/// {
///   "assignments": [{ "nurseName": "Nurse Adams", "assignedRooms": ["600"] }],
///   "warnings": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDocument {
    /// Proposed rooms per nurse.
    #[serde(default, deserialize_with = "loose_entries")]
    pub assignments: Vec<ProposedAssignment>,
    /// Concerns the proposer reported about its own answer.
    #[serde(default, deserialize_with = "loose_warnings")]
    pub warnings: Vec<String>,
}

impl ProposalDocument {
    /// Extracts and parses the document from a free-text reply.
    ///
    /// Proposers tend to wrap their JSON in prose or code fences, so the
    /// span from the first `{` to the last `}` is parsed and the rest is
    /// ignored.
    pub fn from_reply(reply: &str) -> Result<Self, ProposalError> {
        let start = reply.find('{').ok_or(ProposalError::NoJsonObject)?;
        let end = reply.rfind('}').ok_or(ProposalError::NoJsonObject)?;
        if end < start {
            return Err(ProposalError::NoJsonObject);
        }
        Ok(serde_json::from_str(&reply[start..=end])?)
    }
}

fn loose_entries<'de, D>(deserializer: D) -> Result<Vec<ProposedAssignment>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries.into_iter().map(ProposedAssignment::from_value).collect())
}

fn loose_warnings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let warnings = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(warnings
        .into_iter()
        .map(|w| match w {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Claim;

    #[test]
    fn test_plain_json() {
        let doc = ProposalDocument::from_reply(
            r#"{"assignments": [
                {"nurseName": "A", "assignedRooms": ["600", "601"], "reasoning": "block 1"}
            ], "warnings": ["tight"]}"#,
        )
        .unwrap();
        assert_eq!(doc.assignments.len(), 1);
        assert_eq!(doc.assignments[0].nurse_name.as_text(), Some("A"));
        assert_eq!(
            doc.assignments[0].assigned_rooms,
            vec![Claim::from("600"), Claim::from("601")]
        );
        assert_eq!(doc.assignments[0].reasoning.as_deref(), Some("block 1"));
        assert_eq!(doc.warnings, vec!["tight"]);
    }

    #[test]
    fn test_json_wrapped_in_prose() {
        let reply = "Here is the plan:\n```json\n\
                     {\"assignments\": [{\"nurseName\": \"B\", \"assignedRooms\": [\"610\"]}]}\n\
                     ```\nLet me know!";
        let doc = ProposalDocument::from_reply(reply).unwrap();
        assert_eq!(doc.assignments[0].nurse_name.as_text(), Some("B"));
        assert!(doc.warnings.is_empty());
    }

    #[test]
    fn test_missing_and_null_arrays() {
        let doc = ProposalDocument::from_reply("{}").unwrap();
        assert_eq!(doc, ProposalDocument::default());

        let doc =
            ProposalDocument::from_reply(r#"{"assignments": null, "warnings": null}"#).unwrap();
        assert!(doc.assignments.is_empty());
    }

    #[test]
    fn test_bad_entry_kept_for_validator() {
        let doc = ProposalDocument::from_reply(
            r#"{"assignments": [
                {"nurseName": "A", "assignedRooms": ["600"]},
                {"nurseName": "E", "assignedRooms": [604]},
                {"assignedRooms": ["601"]},
                "not an entry"
            ], "warnings": ["ok", 2]}"#,
        )
        .unwrap();

        assert_eq!(doc.assignments.len(), 4);
        assert_eq!(doc.assignments[0].assigned_rooms, vec![Claim::from("600")]);
        assert_eq!(doc.assignments[1].assigned_rooms[0].as_text(), None);
        assert_eq!(doc.assignments[2].nurse_name.as_text(), None);
        assert_eq!(doc.assignments[3].nurse_name.to_string(), "\"not an entry\"");
        assert_eq!(doc.warnings, vec!["ok", "2"]);
    }

    #[test]
    fn test_no_json() {
        assert!(matches!(
            ProposalDocument::from_reply("I cannot help with that."),
            Err(ProposalError::NoJsonObject)
        ));
        assert!(matches!(
            ProposalDocument::from_reply("} backwards {"),
            Err(ProposalError::NoJsonObject)
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ProposalDocument::from_reply(r#"{"assignments": [{"nurseName": "A",}]}"#),
            Err(ProposalError::Malformed(_))
        ));
        assert!(matches!(
            ProposalDocument::from_reply(r#"{"assignments": {"nurseName": "A"}}"#),
            Err(ProposalError::Malformed(_))
        ));
    }
}
