//! View Models
//!
//! Pure derivation of everything the dashboard shows from one snapshot and
//! the current selection. No I/O happens here.

use std::collections::{BTreeMap, BTreeSet};

use clap::ValueEnum;

use crate::protocol::Student;

/// The full List() result at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub students: Vec<Student>,
}

impl Snapshot {
    pub fn new(students: Vec<Student>) -> Self {
        Self { students }
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }
}

/// Which panel the user asked to see
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum GraphKind {
    /// Every record, grouped by subject
    #[default]
    Combined,
    /// One student's records
    Student,
    /// Average marks per subject, as shares
    Pie,
    /// Average marks per subject, as a trend
    Line,
    /// The raw records
    Table,
}

impl GraphKind {
    pub const ALL: [GraphKind; 5] = [
        GraphKind::Combined,
        GraphKind::Student,
        GraphKind::Pie,
        GraphKind::Line,
        GraphKind::Table,
    ];
}

/// Current UI state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub graph: GraphKind,
    pub student: Option<String>,
}

impl Selection {
    pub fn new(graph: GraphKind, student: Option<String>) -> Self {
        Self { graph, student }
    }
}

/// One labelled value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub marks: i64,
}

/// All records of one subject; label is the student name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectSeries {
    pub subject: String,
    pub bars: Vec<Bar>,
}

/// One student's records; label is the subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentView {
    pub name: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectAverage {
    pub subject: String,
    pub average: f64,
}

/// Visibility of each panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Panels {
    pub combined: bool,
    pub student: bool,
    pub pie: bool,
    pub line: bool,
    pub table: bool,
}

impl Panels {
    /// Every panel hidden
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Exactly one panel shown
    pub fn only(kind: GraphKind) -> Self {
        let mut panels = Self::hidden();
        match kind {
            GraphKind::Combined => panels.combined = true,
            GraphKind::Student => panels.student = true,
            GraphKind::Pie => panels.pie = true,
            GraphKind::Line => panels.line = true,
            GraphKind::Table => panels.table = true,
        }
        panels
    }

    pub fn is_visible(&self, kind: GraphKind) -> bool {
        match kind {
            GraphKind::Combined => self.combined,
            GraphKind::Student => self.student,
            GraphKind::Pie => self.pie,
            GraphKind::Line => self.line,
            GraphKind::Table => self.table,
        }
    }

    /// The shown panel, if any
    pub fn visible(&self) -> Option<GraphKind> {
        GraphKind::ALL.into_iter().find(|kind| self.is_visible(*kind))
    }
}

/// Everything one render pass produces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    /// Distinct student names, sorted
    pub student_options: Vec<String>,
    pub combined: Vec<SubjectSeries>,
    /// `None` until a student is selected
    pub student: Option<StudentView>,
    /// Sorted by subject
    pub subject_averages: Vec<SubjectAverage>,
    pub table: Vec<Student>,
    pub panels: Panels,
}

/// Derive the dashboard from a snapshot and the current selection
///
/// An empty snapshot renders nothing: no options, no views, every panel
/// hidden.
pub fn render(snapshot: &Snapshot, selection: &Selection) -> DashboardView {
    if snapshot.is_empty() {
        return DashboardView::default();
    }

    DashboardView {
        student_options: student_options(&snapshot.students),
        combined: combined(&snapshot.students),
        student: selection
            .student
            .as_deref()
            .map(|name| student_view(&snapshot.students, name)),
        subject_averages: subject_averages(&snapshot.students),
        table: snapshot.students.clone(),
        panels: Panels::only(selection.graph),
    }
}

fn student_options(students: &[Student]) -> Vec<String> {
    students
        .iter()
        .map(|s| s.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Series appear in the order their subject first shows up
fn combined(students: &[Student]) -> Vec<SubjectSeries> {
    let mut series: Vec<SubjectSeries> = Vec::new();

    for student in students {
        let bar = Bar {
            label: student.name.clone(),
            marks: student.marks,
        };
        match series.iter_mut().find(|s| s.subject == student.subject) {
            Some(existing) => existing.bars.push(bar),
            None => series.push(SubjectSeries {
                subject: student.subject.clone(),
                bars: vec![bar],
            }),
        }
    }

    series
}

fn student_view(students: &[Student], name: &str) -> StudentView {
    StudentView {
        name: name.to_string(),
        bars: students
            .iter()
            .filter(|s| s.name == name)
            .map(|s| Bar {
                label: s.subject.clone(),
                marks: s.marks,
            })
            .collect(),
    }
}

fn subject_averages(students: &[Student]) -> Vec<SubjectAverage> {
    let mut totals: BTreeMap<&str, (i128, usize)> = BTreeMap::new();

    for student in students {
        let entry = totals.entry(student.subject.as_str()).or_insert((0, 0));
        entry.0 += i128::from(student.marks);
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|(subject, (sum, count))| SubjectAverage {
            subject: subject.to_string(),
            average: sum as f64 / count as f64,
        })
        .collect()
}
