use super::text::{measure, wrap};
use super::{
    Anchor, Certificate, Family, ImageBox, Region, Rule, Run, TextLine, PAGE_HEIGHT_MM,
    PAGE_WIDTH_MM, PT_TO_MM, TEXT_BLACK, THEME_BLUE,
};
use crate::certificate::CertificateData;

const BODY_LEFT: f32 = 13.0;
const BODY_RIGHT: f32 = 197.0;
const BODY_WIDTH: f32 = BODY_RIGHT - BODY_LEFT;
const HEADER_TEXT_X: f32 = 41.0;

const BODY_PT: f32 = 12.0;
const PARAGRAPH_GAP: f32 = 5.0;

const HINDI_NAME: &str = "डॉ. श्यामाप्रसाद मुखर्जी अंतरराष्ट्रीय सूचना प्रौद्योगिकी संस्थान";
const ENGLISH_NAME: [&str; 2] = [
    "Dr. Shyama Prasad Mukherjee International Institute of Information",
    "Technology, Naya Raipur",
];
const JOINT_INITIATIVE: &str = "(a Joint Initiative of NTPC & Govt. of Chhattisgarh)";
const CONTACT: &str = "Email: iiitnr@iiitnr.ac.in, Tel: (0771) 2474040, Web: www.iiitnr.ac.in";
const ESTABLISHED: &str = "Est.2015";
const TITLE: &str = "TO WHOM IT MAY CONCERN";
const FOOTER: &str =
    "Plot No. 7, Sector 24, Near Purkhoti Muktangan, Naya Raipur – 493661, Chhattisgarh, India";
const CONDUCT: &str = "During the period of his internship program, he had been exposed to the \
    different processes and was found punctual, hardworking, and inquisitive. His zeal for \
    learning something is quite peculiar and unique in its own way.";
const CLOSING: &str = "I wish all success for his future endeavors.";

fn line_height(size_pt: f32, factor: f32) -> f32 {
    size_pt * PT_TO_MM * factor
}

struct Builder {
    regions: Vec<Region>,
}

impl Builder {
    fn text(
        &mut self,
        x: f32,
        y: f32,
        size_pt: f32,
        color: &'static str,
        anchor: Anchor,
        runs: Vec<Run>,
    ) {
        self.regions.push(Region::Text(TextLine {
            x,
            y,
            size_pt,
            color,
            anchor,
            runs,
            justify: None,
        }));
    }

    fn rule(&mut self, x1: f32, x2: f32, y: f32, stroke_mm: f32, color: &'static str) {
        self.regions.push(Region::Rule(Rule {
            x1,
            y1: y,
            x2,
            y2: y,
            stroke_mm,
            color,
        }));
    }

    fn paragraph(&mut self, y: f32, runs: &[Run], leading: f32) -> f32 {
        let lines = wrap(runs, BODY_PT, BODY_WIDTH);
        let step = line_height(BODY_PT, leading);
        let last = lines.len().saturating_sub(1);
        let mut baseline = y;

        for (i, line) in lines.into_iter().enumerate() {
            self.regions.push(Region::Text(TextLine {
                x: BODY_LEFT,
                y: baseline,
                size_pt: BODY_PT,
                color: TEXT_BLACK,
                anchor: Anchor::Start,
                runs: line,
                justify: (i < last).then_some(BODY_WIDTH),
            }));
            baseline += step;
        }
        baseline
    }

    fn header(&mut self) {
        self.regions.push(Region::Logo(ImageBox {
            x: 9.0,
            y: 15.0,
            width: 28.0,
            height: 28.0,
        }));

        self.text(
            HEADER_TEXT_X,
            20.0,
            12.0,
            THEME_BLUE,
            Anchor::Start,
            vec![Run::sans(HINDI_NAME).bold()],
        );
        self.text(
            HEADER_TEXT_X,
            26.0,
            13.0,
            THEME_BLUE,
            Anchor::Start,
            vec![Run::sans(ENGLISH_NAME[0]).bold()],
        );
        self.text(
            HEADER_TEXT_X,
            31.5,
            13.0,
            THEME_BLUE,
            Anchor::Start,
            vec![Run::sans(ENGLISH_NAME[1]).bold()],
        );
        self.text(
            HEADER_TEXT_X + 10.0,
            36.5,
            10.0,
            TEXT_BLACK,
            Anchor::Start,
            vec![Run::sans(JOINT_INITIATIVE)],
        );
        self.text(HEADER_TEXT_X, 41.5, 10.0, TEXT_BLACK, Anchor::Start, vec![Run::sans(CONTACT)]);
        self.text(
            BODY_RIGHT + 1.0,
            41.5,
            10.0,
            THEME_BLUE,
            Anchor::End,
            vec![Run::sans(ESTABLISHED).bold()],
        );

        self.rule(12.0, 198.0, 46.0, 0.4, THEME_BLUE);
    }

    fn reference_and_title(&mut self, data: &CertificateData) {
        self.text(
            BODY_LEFT,
            59.0,
            11.0,
            TEXT_BLACK,
            Anchor::Start,
            vec![Run::sans(format!("Ref: {}", data.ref_no)).bold()],
        );
        self.text(
            BODY_RIGHT,
            59.0,
            11.0,
            TEXT_BLACK,
            Anchor::End,
            vec![Run::sans(format!("Date: {}", data.date)).bold()],
        );

        let centre = PAGE_WIDTH_MM / 2.0;
        self.text(centre, 75.0, 14.0, TEXT_BLACK, Anchor::Middle, vec![Run::sans(TITLE).bold()]);
        let half = measure(TITLE, 14.0, Family::Sans, true) / 2.0;
        self.rule(centre - half, centre + half, 76.6, 0.26, TEXT_BLACK);
    }

    fn details(&mut self, data: &CertificateData) -> f32 {
        self.text(
            BODY_LEFT,
            90.0,
            BODY_PT,
            TEXT_BLACK,
            Anchor::Start,
            vec![Run::sans("This is to certify that")],
        );

        let rows = [
            ("Students Name", &data.student_name),
            ("Father’s Name", &data.father_name),
            ("Department Name", &data.department),
            ("Institute Name", &data.institute),
        ];
        let step = line_height(BODY_PT, 1.6) + 2.0;
        let mut y = 100.0;
        for (label, value) in rows {
            self.text(BODY_LEFT, y, BODY_PT, TEXT_BLACK, Anchor::Start, vec![Run::sans(label)]);
            self.text(
                BODY_LEFT + 45.0,
                y,
                BODY_PT,
                TEXT_BLACK,
                Anchor::Middle,
                vec![Run::sans(":")],
            );
            self.text(
                BODY_LEFT + 53.0,
                y,
                BODY_PT,
                TEXT_BLACK,
                Anchor::Start,
                vec![Run::sans(value.to_uppercase()).bold()],
            );
            y += step;
        }
        y + 6.0
    }

    fn narrative(&mut self, data: &CertificateData, y: f32) {
        let internship = vec![
            Run::sans("has successfully completed "),
            Run::sans("eight").bold(),
            Run::sans(format!(
                " weeks (From {} to {}) of Internship as a participant of the IIIT-NR Outreach \
                 Program under the guidance of ",
                data.start_date, data.end_date
            )),
            Run::serif_bold(data.guide_name.as_str()),
            Run::sans(", "),
            Run::serif_bold(data.guide_title.as_str()),
            Run::sans(". His internship activity focused on "),
            Run::serif_bold(data.focus_areas.as_str()),
            Run::sans(". He has contributed towards ‘"),
            Run::serif_bold(data.contribution.as_str()),
            Run::sans("’."),
        ];

        let y = self.paragraph(y, &internship, 1.8) + PARAGRAPH_GAP;
        let y = self.paragraph(y, &[Run::sans(CONDUCT)], 1.8) + PARAGRAPH_GAP;
        self.text(BODY_LEFT, y + 2.0, BODY_PT, TEXT_BLACK, Anchor::Start, vec![Run::sans(CLOSING)]);
    }

    fn signatories(&mut self, data: &CertificateData) {
        let gap = 4.0;
        let column = (BODY_WIDTH - 2.0 * gap) / 3.0;
        let columns = [
            (&data.sign_left_name, &data.sign_left_title),
            (&data.sign_center_name, &data.sign_center_title),
            (&data.sign_right_name, &data.sign_right_title),
        ];
        let title_y = PAGE_HEIGHT_MM - 32.0;
        let name_y = title_y - line_height(11.0, 1.5);

        for (i, (name, title)) in columns.into_iter().enumerate() {
            let centre = BODY_LEFT + column / 2.0 + i as f32 * (column + gap);
            self.text(
                centre,
                name_y,
                11.0,
                TEXT_BLACK,
                Anchor::Middle,
                vec![Run::sans(name.as_str()).bold()],
            );
            self.text(
                centre,
                title_y,
                11.0,
                TEXT_BLACK,
                Anchor::Middle,
                vec![Run::sans(title.as_str())],
            );
        }
    }

    fn footer(&mut self) {
        let rule_y = PAGE_HEIGHT_MM - 13.0;
        self.rule(0.0, PAGE_WIDTH_MM, rule_y, 0.4, THEME_BLUE);
        self.text(
            PAGE_WIDTH_MM / 2.0,
            rule_y + 4.5,
            9.0,
            TEXT_BLACK,
            Anchor::Middle,
            vec![Run::sans(FOOTER)],
        );
    }
}

pub fn render(data: &CertificateData) -> Certificate {
    let mut builder = Builder { regions: Vec::new() };

    builder.header();
    builder.reference_and_title(data);
    let y = builder.details(data);
    builder.narrative(data, y);
    builder.signatories(data);
    builder.footer();

    Certificate {
        student_name: data.student_name.clone(),
        regions: builder.regions,
    }
}
