/// Fixed catalog of conditions the screening model can report
///
/// The order matters: a condition's position selects which feature group
/// modulates its probability.
pub const CONDITIONS: [&str; 10] = [
    "Atrial Fibrillation",
    "Ventricular Hypertrophy",
    "Myocardial Infarction",
    "Sinus Bradycardia",
    "Sinus Tachycardia",
    "Heart Block",
    "ST Segment Elevation",
    "T Wave Inversion",
    "QT Prolongation",
    "Premature Ventricular Contractions",
];

pub fn is_known(name: &str) -> bool {
    CONDITIONS.contains(&name)
}
