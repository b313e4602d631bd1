use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Business domain a process recruits for and an employee is strongest in.
///
/// Matching treats this as the hard requirement: an employee is only ever
/// placed on a process sharing their potential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Potential {
    Sales,
    Consultation,
    Service,
    Support,
}

impl Potential {
    pub const fn label(self) -> &'static str {
        match self {
            Potential::Sales => "Sales",
            Potential::Consultation => "Consultation",
            Potential::Service => "Service",
            Potential::Support => "Support",
        }
    }

    pub const fn ordered() -> [Potential; 4] {
        [
            Potential::Sales,
            Potential::Consultation,
            Potential::Service,
            Potential::Support,
        ]
    }

    /// Parse a raw attribute value. Leading and trailing whitespace is
    /// tolerated; casing and inner spelling are not.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Sales" => Some(Potential::Sales),
            "Consultation" => Some(Potential::Consultation),
            "Service" => Some(Potential::Service),
            "Support" => Some(Potential::Support),
            _ => None,
        }
    }
}

impl FromStr for Potential {
    type Err = AttributeParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input).ok_or_else(|| {
            AttributeParseError::new(
                "potential",
                input,
                Potential::ordered().iter().map(|value| value.label()).collect(),
            )
        })
    }
}

impl TryFrom<String> for Potential {
    type Error = AttributeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Communication skill tier. A soft preference during matching: exact-tier
/// processes win, but a potential-only fallback still places the employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Communication {
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
}

impl Communication {
    pub const fn label(self) -> &'static str {
        match self {
            Communication::Excellent => "Excellent",
            Communication::VeryGood => "Very Good",
            Communication::Good => "Good",
        }
    }

    pub const fn ordered() -> [Communication; 3] {
        [
            Communication::Excellent,
            Communication::VeryGood,
            Communication::Good,
        ]
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Excellent" => Some(Communication::Excellent),
            "Very Good" => Some(Communication::VeryGood),
            "Good" => Some(Communication::Good),
            _ => None,
        }
    }
}

impl FromStr for Communication {
    type Err = AttributeParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input).ok_or_else(|| {
            AttributeParseError::new(
                "communication",
                input,
                Communication::ordered().iter().map(|value| value.label()).collect(),
            )
        })
    }
}

impl TryFrom<String> for Communication {
    type Error = AttributeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A trimmed attribute value that still matches no recognized spelling.
///
/// Both attribute enums parse through [`FromStr`] and deserialize through
/// `TryFrom<String>`, so query strings and JSON payloads tolerate the same
/// padded spellings the catalog importer does.
#[derive(Debug, thiserror::Error)]
#[error("unknown {attribute} value '{value}'; expected one of: {}", .expected.join(", "))]
pub struct AttributeParseError {
    attribute: &'static str,
    value: String,
    expected: Vec<&'static str>,
}

impl AttributeParseError {
    fn new(attribute: &'static str, value: &str, expected: Vec<&'static str>) -> Self {
        Self {
            attribute,
            value: value.trim().to_string(),
            expected,
        }
    }
}

/// One row of the process catalog: a business process advertising open
/// slots for employees with a given attribute profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub name: String,
    pub potential: Potential,
    pub communication: Communication,
    pub vacancy: u32,
}

impl Process {
    pub const fn has_open_slots(&self) -> bool {
        self.vacancy > 0
    }
}

/// Employee attributes relevant to placement. `email` is the unique key for
/// the assignment table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub name: String,
    pub email: String,
    pub potential: Potential,
    pub communication: Communication,
}

/// Inbound placement payload. Trimmed into an [`EmployeeProfile`] before it
/// touches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub name: String,
    pub email: String,
    pub potential: Potential,
    pub communication: Communication,
}

impl PlacementRequest {
    pub fn into_profile(self) -> EmployeeProfile {
        EmployeeProfile {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            potential: self.potential,
            communication: self.communication,
        }
    }
}

/// Inbound reassignment payload: replacement employee fields plus the
/// destination process. Omitting the process moves the employee to the
/// bench and releases their slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignmentRequest {
    pub name: String,
    pub email: String,
    pub potential: Potential,
    pub communication: Communication,
    #[serde(default)]
    pub process: Option<String>,
}

impl ReassignmentRequest {
    pub fn into_parts(self) -> (EmployeeProfile, Option<String>) {
        let target = self
            .process
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        let employee = EmployeeProfile {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            potential: self.potential,
            communication: self.communication,
        };
        (employee, target)
    }
}

/// Stable identifier handed out when an allocation attempt is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentId(pub String);

/// Persistent record of one allocation attempt. `process` is `None` when the
/// attempt found no process with an open slot; the record is kept anyway so
/// the history reflects failed days as well as successful ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub employee: EmployeeProfile,
    pub process: Option<String>,
    pub assigned_at: DateTime<Utc>,
}

impl Assignment {
    pub fn succeeded(&self) -> bool {
        self.process.is_some()
    }

    pub fn outcome_label(&self) -> &'static str {
        if self.succeeded() {
            "placed"
        } else {
            "unplaced"
        }
    }

    pub fn to_view(&self) -> AssignmentView {
        AssignmentView {
            assignment_id: self.id.clone(),
            employee_name: self.employee.name.clone(),
            email: self.employee.email.clone(),
            potential: self.employee.potential,
            communication: self.employee.communication,
            process: self.process.clone(),
            outcome: self.outcome_label(),
            assigned_at: self.assigned_at,
        }
    }
}

/// Outcome of one allocation call, surfaced to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentResult {
    pub assignment_id: AssignmentId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_name: Option<String>,
    pub success: bool,
}

/// Serializable projection of an [`Assignment`] for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentView {
    pub assignment_id: AssignmentId,
    pub employee_name: String,
    pub email: String,
    pub potential: Potential,
    pub communication: Communication,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process: Option<String>,
    pub outcome: &'static str,
    pub assigned_at: DateTime<Utc>,
}
