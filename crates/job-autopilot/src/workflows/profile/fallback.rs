use super::domain::{
    CandidateProfile, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry,
};

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

impl CandidateProfile {
    /// Canned profile served when no resume source is available.
    pub fn fallback() -> Self {
        Self {
            personal_info: PersonalInfo {
                name: "John Developer".to_string(),
                email: "john.developer@email.com".to_string(),
                phone: "+91-9876543210".to_string(),
                location: "Mumbai, India".to_string(),
                linked_in: Some("linkedin.com/in/johndeveloper".to_string()),
                github: Some("github.com/johndeveloper".to_string()),
            },
            summary: "Experienced Full Stack Developer with 3+ years of experience in React, Node.js, and modern web technologies. Passionate about building scalable applications and learning new technologies.".to_string(),
            experience: vec![ExperienceEntry {
                title: "Software Developer".to_string(),
                company: "Tech Solutions Inc.".to_string(),
                duration: "2+ years".to_string(),
                description:
                    "Developed and maintained web applications using React, Node.js, and MongoDB"
                        .to_string(),
            }],
            skills: owned(&[
                "JavaScript",
                "TypeScript",
                "React",
                "Node.js",
                "MongoDB",
                "PostgreSQL",
                "AWS",
                "Git",
            ]),
            education: vec![EducationEntry {
                degree: "B.Tech in Computer Science".to_string(),
                institution: "Indian Institute of Technology".to_string(),
                year: "2021".to_string(),
            }],
            projects: vec![ProjectEntry {
                name: "E-commerce Platform".to_string(),
                description: "Full-stack e-commerce application with payment integration"
                    .to_string(),
                technologies: owned(&["React", "Node.js", "MongoDB", "Stripe"]),
            }],
        }
    }
}
