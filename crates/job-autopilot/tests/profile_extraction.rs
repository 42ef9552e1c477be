//! Resume parsing through the public extractor and parser.

use std::path::Path;

use job_autopilot::workflows::profile::{ProfileExtractor, ResumeParser};

const RESUME: &str = "Ananya Iyer
ananya.iyer@mail.test
(080) 555-0142
linkedin.com/in/ananya-iyer

Work Experience
Northwind Technologies, Lead Engineer
Contoso Ltd. - Engineer
Fabrikam Inc. - Intern
Tailspin Company - Contractor

Education
Bachelor of Engineering, VTU
Master of Science, NUS
PhD, MIT

Technical Skills: TypeScript, React, GraphQL, AWS

Projects
Realtime dashboards
";

#[test]
fn structured_fields_are_extracted_and_bounded() {
    let profile = ProfileExtractor::new().extract(RESUME);

    assert_eq!(profile.personal_info.name, "Ananya Iyer");
    assert_eq!(profile.personal_info.email, "ananya.iyer@mail.test");
    assert_eq!(profile.personal_info.phone, "(080) 555-0142");
    assert_eq!(
        profile.personal_info.linked_in.as_deref(),
        Some("linkedin.com/in/ananya-iyer")
    );
    assert!(profile.personal_info.github.is_none());
    assert_eq!(profile.experience.len(), 3);
    assert_eq!(profile.education.len(), 2);
    assert_eq!(profile.education[0].degree, "Bachelor of Engineering, VTU");
    assert_eq!(profile.skills, vec!["TypeScript", "React", "AWS", "GraphQL"]);
    assert_eq!(profile.projects.len(), 1);
    assert_eq!(
        profile.projects[0].technologies,
        vec!["TypeScript", "React", "AWS", "GraphQL"]
    );
}

#[test]
fn long_resumes_never_exceed_entry_caps() {
    let mut text = String::from("Long Resume\n\nExperience\n");
    for index in 0..40 {
        text.push_str(&format!("Company{index} Solutions - Engineer\n"));
    }
    text.push_str("\nEducation\n");
    for _ in 0..10 {
        text.push_str("Master of Arts\n");
    }

    let profile = ProfileExtractor::new().extract(&text);

    assert!(profile.experience.len() <= 3);
    assert!(profile.education.len() <= 2);
}

#[test]
fn resume_without_skills_heading_has_no_skills() {
    let profile = ProfileExtractor::new().extract("Jo Bloggs\nKnows Java, Rust and Docker.\n");
    assert!(profile.skills.is_empty());
}

#[test]
fn absent_resume_returns_canned_profile() {
    let profile = ResumeParser::default()
        .parse(Path::new("/nonexistent/resume.pdf"))
        .expect("fallback profile");

    assert_eq!(profile.personal_info.name, "John Developer");
    assert_eq!(
        profile.skills,
        vec!["JavaScript", "TypeScript", "React", "Node.js", "MongoDB", "PostgreSQL", "AWS", "Git"]
    );
    assert_eq!(profile.experience[0].company, "Tech Solutions Inc.");
}
