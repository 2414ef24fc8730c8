use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role, fixed at registration. Every authorization decision starts here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Student,
    Company,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Student => "Student",
            UserType::Company => "Company",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Student" => Ok(UserType::Student),
            "Company" => Ok(UserType::Company),
            _ => Err(()),
        }
    }
}

/// Lifecycle state of an application. Set to Pending on submission; only the
/// company owning the target internship may overwrite it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ApplicationStatus::Pending),
            "Accepted" => Ok(ApplicationStatus::Accepted),
            "Rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// Publication state of an internship posting. Only Published postings show up
/// in the public listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InternshipStatus {
    Pending,
    Published,
}

impl InternshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InternshipStatus::Pending => "Pending",
            InternshipStatus::Published => "Published",
        }
    }
}

impl fmt::Display for InternshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InternshipStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(InternshipStatus::Pending),
            "Published" => Ok(InternshipStatus::Published),
            _ => Err(()),
        }
    }
}
