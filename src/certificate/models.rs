use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateData {
    #[serde(default)]
    pub ref_no: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub father_name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub institute: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub guide_name: String,
    #[serde(default)]
    pub guide_title: String,
    #[serde(default)]
    pub focus_areas: String,
    #[serde(default)]
    pub contribution: String,
    #[serde(default)]
    pub sign_left_name: String,
    #[serde(default)]
    pub sign_left_title: String,
    #[serde(default)]
    pub sign_center_name: String,
    #[serde(default)]
    pub sign_center_title: String,
    #[serde(default)]
    pub sign_right_name: String,
    #[serde(default)]
    pub sign_right_title: String,
}

impl Default for CertificateData {
    fn default() -> Self {
        Self {
            ref_no: "IIITNR/ACAD/OIP/2024/01".to_string(),
            date: "28. 07. 2024".to_string(),
            student_name: "OM BHATIA".to_string(),
            father_name: "SUSHIL BHATIA".to_string(),
            department: "INFORMATION TECHNOLOGY".to_string(),
            institute: "MANIPAL UNIVERSITY JAIPUR".to_string(),
            start_date: "22/05/2023".to_string(),
            end_date: "22/07/2023".to_string(),
            guide_name: "Dr. Mallikharjuna Rao K".to_string(),
            guide_title: "Assistant Professor".to_string(),
            focus_areas: "Evolutionary Algorithms, Optimization and Artifical Intelligence"
                .to_string(),
            contribution:
                "Application of Optimzation Algorithms for Predective Modeling on Diabetes"
                    .to_string(),
            sign_left_name: "Dr. Anurag Singh".to_string(),
            sign_left_title: "Faculty-in-charge OIP".to_string(),
            sign_center_name: "Mr. K. G. Atram".to_string(),
            sign_center_title: "Faculty-in-charge OIP".to_string(),
            sign_right_name: "Dr. Mithilesh Chaube".to_string(),
            sign_right_title: "Dean (R&I)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    RefNo,
    Date,
    StudentName,
    FatherName,
    Department,
    Institute,
    StartDate,
    EndDate,
    GuideName,
    GuideTitle,
    FocusAreas,
    Contribution,
    SignLeftName,
    SignLeftTitle,
    SignCenterName,
    SignCenterTitle,
    SignRightName,
    SignRightTitle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Student,
    Internship,
    Signatories,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Student, Section::Internship, Section::Signatories];

    pub fn heading(self) -> &'static str {
        match self {
            Section::Student => "Student Details",
            Section::Internship => "Internship Info",
            Section::Signatories => "Signatories",
        }
    }
}

impl Field {
    pub const ALL: [Field; 18] = [
        Field::RefNo,
        Field::Date,
        Field::StudentName,
        Field::FatherName,
        Field::Department,
        Field::Institute,
        Field::StartDate,
        Field::EndDate,
        Field::GuideName,
        Field::GuideTitle,
        Field::FocusAreas,
        Field::Contribution,
        Field::SignLeftName,
        Field::SignLeftTitle,
        Field::SignCenterName,
        Field::SignCenterTitle,
        Field::SignRightName,
        Field::SignRightTitle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::RefNo => "refNo",
            Field::Date => "date",
            Field::StudentName => "studentName",
            Field::FatherName => "fatherName",
            Field::Department => "department",
            Field::Institute => "institute",
            Field::StartDate => "startDate",
            Field::EndDate => "endDate",
            Field::GuideName => "guideName",
            Field::GuideTitle => "guideTitle",
            Field::FocusAreas => "focusAreas",
            Field::Contribution => "contribution",
            Field::SignLeftName => "signLeftName",
            Field::SignLeftTitle => "signLeftTitle",
            Field::SignCenterName => "signCenterName",
            Field::SignCenterTitle => "signCenterTitle",
            Field::SignRightName => "signRightName",
            Field::SignRightTitle => "signRightTitle",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::RefNo => "Reference No.",
            Field::Date => "Date",
            Field::StudentName => "Student Name",
            Field::FatherName => "Father's Name",
            Field::Department => "Department",
            Field::Institute => "Institute",
            Field::StartDate => "Start Date",
            Field::EndDate => "End Date",
            Field::GuideName => "Guide Name",
            Field::GuideTitle => "Guide Title",
            Field::FocusAreas => "Focus Areas",
            Field::Contribution => "Contribution Title",
            Field::SignLeftName => "Left Signatory",
            Field::SignLeftTitle => "Left Signatory Title",
            Field::SignCenterName => "Center Signatory",
            Field::SignCenterTitle => "Center Signatory Title",
            Field::SignRightName => "Right Signatory",
            Field::SignRightTitle => "Right Signatory Title",
        }
    }

    pub fn section(self) -> Section {
        match self {
            Field::RefNo
            | Field::Date
            | Field::StudentName
            | Field::FatherName
            | Field::Department
            | Field::Institute => Section::Student,
            Field::StartDate
            | Field::EndDate
            | Field::GuideName
            | Field::GuideTitle
            | Field::FocusAreas
            | Field::Contribution => Section::Internship,
            _ => Section::Signatories,
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, Field::FocusAreas | Field::Contribution)
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl CertificateData {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::RefNo => &self.ref_no,
            Field::Date => &self.date,
            Field::StudentName => &self.student_name,
            Field::FatherName => &self.father_name,
            Field::Department => &self.department,
            Field::Institute => &self.institute,
            Field::StartDate => &self.start_date,
            Field::EndDate => &self.end_date,
            Field::GuideName => &self.guide_name,
            Field::GuideTitle => &self.guide_title,
            Field::FocusAreas => &self.focus_areas,
            Field::Contribution => &self.contribution,
            Field::SignLeftName => &self.sign_left_name,
            Field::SignLeftTitle => &self.sign_left_title,
            Field::SignCenterName => &self.sign_center_name,
            Field::SignCenterTitle => &self.sign_center_title,
            Field::SignRightName => &self.sign_right_name,
            Field::SignRightTitle => &self.sign_right_title,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::RefNo => &mut self.ref_no,
            Field::Date => &mut self.date,
            Field::StudentName => &mut self.student_name,
            Field::FatherName => &mut self.father_name,
            Field::Department => &mut self.department,
            Field::Institute => &mut self.institute,
            Field::StartDate => &mut self.start_date,
            Field::EndDate => &mut self.end_date,
            Field::GuideName => &mut self.guide_name,
            Field::GuideTitle => &mut self.guide_title,
            Field::FocusAreas => &mut self.focus_areas,
            Field::Contribution => &mut self.contribution,
            Field::SignLeftName => &mut self.sign_left_name,
            Field::SignLeftTitle => &mut self.sign_left_title,
            Field::SignCenterName => &mut self.sign_center_name,
            Field::SignCenterTitle => &mut self.sign_center_title,
            Field::SignRightName => &mut self.sign_right_name,
            Field::SignRightTitle => &mut self.sign_right_title,
        };
        *slot = value.into();
    }
}
