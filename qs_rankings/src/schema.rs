// ********* Column schema ***********

use std::fmt::Display;
use std::str::FromStr;

use snafu::Snafu;

/// Number of data rows in the 2022 public results workbook.
pub const EXPECTED_ROWS: usize = 1300;

/// The columns of the rankings table, in the positional order of the workbook.
///
/// The names follow the spelling used by the downstream reports, including
/// `AcademicReputatation*`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Column {
    NationalRank,
    RegionalRank,
    Rank2022,
    Rank2021,
    InstitutionName,
    LocationCode,
    LocationCountry,
    ClassificationSize,
    ClassificationFocus,
    ClassificationRes,
    ClassificationAge,
    ClassificationStatus,
    AcademicReputatationScore,
    AcademicReputatationRank,
    EmployerReputationScore,
    EmployerReputationRank,
    FacultyStudentScore,
    FacultyStudentRank,
    CitationsPerFacultyScore,
    CitationsPerFacultyRank,
    InternationalFacultyScore,
    InternationalFacultyRank,
    InternationalStudentsScore,
    InternationalStudentsRank,
    OverallScore,
}

/// How the raw cells of a column are converted.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ColumnKind {
    /// Ordinal ranks, possibly tied ("12=") or banded ("12-15").
    Rank,
    /// The overall score, where a lone dash marks a missing value.
    OverallScore,
    /// Numeric category scores.
    Score,
    Text,
    Integer,
}

/// The storage type of a column once loaded.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum DType {
    Float,
    Int,
    Text,
}

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(display("Unknown column {name:?}"))]
pub struct ParseColumnError {
    pub name: String,
}

impl Column {
    pub const COUNT: usize = 25;

    /// All the columns, in positional order.
    pub const ALL: [Column; Column::COUNT] = [
        Column::NationalRank,
        Column::RegionalRank,
        Column::Rank2022,
        Column::Rank2021,
        Column::InstitutionName,
        Column::LocationCode,
        Column::LocationCountry,
        Column::ClassificationSize,
        Column::ClassificationFocus,
        Column::ClassificationRes,
        Column::ClassificationAge,
        Column::ClassificationStatus,
        Column::AcademicReputatationScore,
        Column::AcademicReputatationRank,
        Column::EmployerReputationScore,
        Column::EmployerReputationRank,
        Column::FacultyStudentScore,
        Column::FacultyStudentRank,
        Column::CitationsPerFacultyScore,
        Column::CitationsPerFacultyRank,
        Column::InternationalFacultyScore,
        Column::InternationalFacultyRank,
        Column::InternationalStudentsScore,
        Column::InternationalStudentsRank,
        Column::OverallScore,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Column::NationalRank => "NationalRank",
            Column::RegionalRank => "RegionalRank",
            Column::Rank2022 => "Rank2022",
            Column::Rank2021 => "Rank2021",
            Column::InstitutionName => "InstitutionName",
            Column::LocationCode => "LocationCode",
            Column::LocationCountry => "LocationCountry",
            Column::ClassificationSize => "ClassificationSize",
            Column::ClassificationFocus => "ClassificationFocus",
            Column::ClassificationRes => "ClassificationRes",
            Column::ClassificationAge => "ClassificationAge",
            Column::ClassificationStatus => "ClassificationStatus",
            Column::AcademicReputatationScore => "AcademicReputatationScore",
            Column::AcademicReputatationRank => "AcademicReputatationRank",
            Column::EmployerReputationScore => "EmployerReputationScore",
            Column::EmployerReputationRank => "EmployerReputationRank",
            Column::FacultyStudentScore => "FacultyStudentScore",
            Column::FacultyStudentRank => "FacultyStudentRank",
            Column::CitationsPerFacultyScore => "CitationsPerFacultyScore",
            Column::CitationsPerFacultyRank => "CitationsPerFacultyRank",
            Column::InternationalFacultyScore => "InternationalFacultyScore",
            Column::InternationalFacultyRank => "InternationalFacultyRank",
            Column::InternationalStudentsScore => "InternationalStudentsScore",
            Column::InternationalStudentsRank => "InternationalStudentsRank",
            Column::OverallScore => "OverallScore",
        }
    }

    /// Position of the column in a worksheet row (0 is column A).
    pub fn position(&self) -> usize {
        *self as usize
    }

    /// The static converter table.
    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::NationalRank
            | Column::RegionalRank
            | Column::Rank2022
            | Column::Rank2021
            | Column::AcademicReputatationRank
            | Column::EmployerReputationRank
            | Column::FacultyStudentRank
            | Column::CitationsPerFacultyRank
            | Column::InternationalFacultyRank
            | Column::InternationalStudentsRank => ColumnKind::Rank,
            Column::OverallScore => ColumnKind::OverallScore,
            Column::AcademicReputatationScore
            | Column::EmployerReputationScore
            | Column::FacultyStudentScore
            | Column::CitationsPerFacultyScore
            | Column::InternationalFacultyScore
            | Column::InternationalStudentsScore => ColumnKind::Score,
            Column::ClassificationAge => ColumnKind::Integer,
            Column::InstitutionName
            | Column::LocationCode
            | Column::LocationCountry
            | Column::ClassificationSize
            | Column::ClassificationFocus
            | Column::ClassificationRes
            | Column::ClassificationStatus => ColumnKind::Text,
        }
    }

    pub fn dtype(&self) -> DType {
        match self.kind() {
            ColumnKind::Rank | ColumnKind::OverallScore | ColumnKind::Score => DType::Float,
            ColumnKind::Integer => DType::Int,
            ColumnKind::Text => DType::Text,
        }
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Column {
    type Err = ParseColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .iter()
            .find(|c| c.name() == s)
            .copied()
            .ok_or_else(|| ParseColumnError {
                name: s.to_string(),
            })
    }
}
