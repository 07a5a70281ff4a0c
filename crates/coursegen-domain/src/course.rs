//! Course metadata collected alongside the uploaded outlines

/// Intended audience of a training course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    /// Staff of a registered investment adviser
    RiaEmployees,

    /// Compliance officers and their teams
    ComplianceOfficers,

    /// Investment advisers themselves
    InvestmentAdvisers,

    /// Anyone working in finance
    GeneralFinanceProfessionals,
}

impl Audience {
    /// All audiences, in presentation order
    pub const ALL: [Audience; 4] = [
        Audience::RiaEmployees,
        Audience::ComplianceOfficers,
        Audience::InvestmentAdvisers,
        Audience::GeneralFinanceProfessionals,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Audience::RiaEmployees => "RIA Employees",
            Audience::ComplianceOfficers => "Compliance Officers",
            Audience::InvestmentAdvisers => "Investment Advisers",
            Audience::GeneralFinanceProfessionals => "General Finance Professionals",
        }
    }

    /// Parse an audience from its label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.label().eq_ignore_ascii_case(wanted))
    }
}

impl std::str::FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid audience: {}", s))
    }
}

/// Regulatory framework the course aligns with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regulation {
    /// Securities and Exchange Commission rules
    Sec,

    /// FINRA rules
    Finra,

    /// The Investment Advisers Act of 1940
    InvestmentAdvisersAct1940,

    /// More than one framework
    Multiple,
}

impl Regulation {
    /// All regulations, in presentation order
    pub const ALL: [Regulation; 4] = [
        Regulation::Sec,
        Regulation::Finra,
        Regulation::InvestmentAdvisersAct1940,
        Regulation::Multiple,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Regulation::Sec => "SEC",
            Regulation::Finra => "FINRA",
            Regulation::InvestmentAdvisersAct1940 => "Investment Advisers Act of 1940",
            Regulation::Multiple => "Multiple",
        }
    }

    /// Parse a regulation from its label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(wanted))
    }
}

impl std::str::FromStr for Regulation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid regulation: {}", s))
    }
}

/// Scalar details describing the course being generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetails {
    /// Course title
    pub title: String,

    /// Short course summary
    pub description: String,

    /// Planned duration in minutes
    pub duration_minutes: u32,

    /// Intended audience
    pub audience: Audience,

    /// Regulatory alignment
    pub regulation: Regulation,
}

impl CourseDetails {
    /// Validate that every field is filled in
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is empty".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("description is empty".to_string());
        }
        if self.duration_minutes == 0 {
            return Err("duration_minutes must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_course() -> CourseDetails {
        CourseDetails {
            title: "2025 Compliance Essentials".to_string(),
            description: "Annual refresher".to_string(),
            duration_minutes: 30,
            audience: Audience::RiaEmployees,
            regulation: Regulation::Sec,
        }
    }

    #[test]
    fn test_valid_course() {
        assert!(sample_course().validate().is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut course = sample_course();
        course.title = "   ".to_string();
        assert!(course.validate().is_err());
    }

    #[test]
    fn test_blank_description_rejected() {
        let mut course = sample_course();
        course.description = String::new();
        assert!(course.validate().is_err());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut course = sample_course();
        course.duration_minutes = 0;
        assert!(course.validate().is_err());
    }

    #[test]
    fn test_audience_parsing() {
        assert_eq!(Audience::parse("compliance officers"), Some(Audience::ComplianceOfficers));
        assert_eq!(Audience::parse(" RIA Employees "), Some(Audience::RiaEmployees));
        assert!("Traders".parse::<Audience>().is_err());
    }

    #[test]
    fn test_regulation_parsing() {
        assert_eq!(Regulation::parse("finra"), Some(Regulation::Finra));
        assert_eq!(
            Regulation::parse("Investment Advisers Act of 1940"),
            Some(Regulation::InvestmentAdvisersAct1940)
        );
        assert!("GDPR".parse::<Regulation>().is_err());
    }

    #[test]
    fn test_labels_round_trip() {
        for audience in Audience::ALL {
            assert_eq!(Audience::parse(audience.label()), Some(audience));
        }
        for regulation in Regulation::ALL {
            assert_eq!(Regulation::parse(regulation.label()), Some(regulation));
        }
    }
}
