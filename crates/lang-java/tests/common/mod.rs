use clientspec_java::model::JavaFileModel;
use clientspec_java::{ConstantTable, ControllerVisit, ControllerVisitor, JavaParser};
use std::path::PathBuf;

pub fn parse_all(files: &[(&str, &str)]) -> Vec<JavaFileModel> {
    let parser = JavaParser::new().expect("Failed to create JavaParser");
    files
        .iter()
        .map(|(path, content)| {
            let path = PathBuf::from(path);
            parser
                .parse_file(content, Some(&path))
                .expect("Failed to parse test source")
        })
        .collect()
}

/// Parses `files` and visits every controller among them, in file order.
#[allow(dead_code)]
pub fn visit_all(files: &[(&str, &str)]) -> Vec<ControllerVisit> {
    let models = parse_all(files);
    let constants = ConstantTable::from_files(&models);
    let visitor = ControllerVisitor::new(&constants);

    models
        .iter()
        .flat_map(|m| m.types.iter().map(move |d| (m, d)))
        .filter(|(_, d)| ControllerVisitor::accept(d))
        .map(|(m, d)| {
            visitor
                .visit_controller(m, d)
                .expect("controller visit failed")
        })
        .collect()
}

#[allow(dead_code)]
pub fn visit_one(content: &str) -> ControllerVisit {
    let mut visits = visit_all(&[("Controller.java", content)]);
    assert_eq!(visits.len(), 1, "expected exactly one controller");
    visits.remove(0)
}
