mod study_vm;

pub use study_vm::{ALL_CATEGORIES, CardFace, StudyIntent, StudyVm};
