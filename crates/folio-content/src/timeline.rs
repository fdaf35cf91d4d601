#![forbid(unsafe_code)]

//! Experience timeline and project showcase tables.

use serde::Serialize;

/// One entry of the experience timeline, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Experience {
    pub company: &'static str,
    pub role: &'static str,
    pub period: &'static str,
    pub description: &'static str,
    pub skills: &'static [&'static str],
    pub achievements: &'static [&'static str],
    pub logo: &'static str,
}

pub const EXPERIENCES: &[Experience] = &[
    Experience {
        company: "M-Tutor",
        role: "Game Developer Intern",
        period: "Sep 2023 - Apr 2024",
        description: "Developed educational apps for students across mobile, web, VR, and AR \
                      platforms. Created engaging apps like VR Labs and Virtual Tour.",
        skills: &["Unity", "VR/AR", "Cross-platform", "API Integration"],
        achievements: &[
            "Built 5+ educational VR applications",
            "Improved user engagement by 150%",
            "Led cross-platform development team",
        ],
        logo: "🎓",
    },
    Experience {
        company: "Cisco",
        role: "Cybersecurity Program",
        period: "Jul 2023 - Sep 2023",
        description: "Completed Cisco Virtual Internship in Cybersecurity, focusing on hacking \
                      techniques, countermeasures, and secure network design.",
        skills: &["Cybersecurity", "Network Design", "Cisco Tools"],
        achievements: &[
            "Designed secure campus network",
            "Completed advanced security training",
            "Earned cybersecurity certification",
        ],
        logo: "🔐",
    },
    Experience {
        company: "TryCAE",
        role: "Virtual Reality Developer Intern",
        period: "Jan 2023 - Jun 2023",
        description: "Developed VR apps using Unity 3D on Meta Quest 2 for mechanical \
                      engineering prototypes.",
        skills: &["Unity 3D", "VR Development", "3D Modeling"],
        achievements: &[
            "Created immersive CAD visualizations",
            "Reduced prototyping costs by 40%",
            "Integrated with CAD workflows",
        ],
        logo: "🥽",
    },
];

/// Release state badge of a project card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProjectStatus {
    Live,
    #[serde(rename = "In Development")]
    InDevelopment,
    Beta,
}

/// Labelled figure shown on a project card (`users: 1000+`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectMetric {
    pub label: &'static str,
    pub value: &'static str,
}

const fn metric(label: &'static str, value: &'static str) -> ProjectMetric {
    ProjectMetric { label, value }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
    pub highlight: &'static str,
    pub status: ProjectStatus,
    pub metrics: &'static [ProjectMetric],
    pub features: &'static [&'static str],
    /// `None` renders the link disabled.
    pub demo_url: Option<&'static str>,
    pub source_url: Option<&'static str>,
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "VR Mechanical Engineering Suite",
        description: "Revolutionary VR platform for mechanical engineering education with \
                      immersive car engine simulations and AR bearing mechanisms.",
        tech: &["Unity 3D", "VR", "AR", "CAD Integration"],
        highlight: "₹2.5L Funding",
        status: ProjectStatus::Live,
        metrics: &[
            metric("users", "1000+"),
            metric("rating", "4.8/5"),
            metric("downloads", "5000+"),
        ],
        features: &[
            "Real-time 3D visualization",
            "Interactive simulations",
            "Multi-platform support",
        ],
        demo_url: None,
        source_url: None,
    },
    Project {
        title: "Smart Healthcare Platform",
        description: "Full-stack web application revolutionizing doctor appointment booking \
                      with AI-powered scheduling and patient management.",
        tech: &["MongoDB", "Express.js", "React.js", "Node.js", "AI/ML"],
        highlight: "MERN Stack",
        status: ProjectStatus::InDevelopment,
        metrics: &[
            metric("appointments", "500+"),
            metric("doctors", "50+"),
            metric("efficiency", "+85%"),
        ],
        features: &[
            "AI scheduling",
            "Real-time notifications",
            "Analytics dashboard",
        ],
        demo_url: None,
        source_url: None,
    },
    Project {
        title: "Immersive Virtual Tourism",
        description: "Next-generation VR tourism platform enabling photorealistic virtual \
                      travel experiences with social interaction features.",
        tech: &["Unity", "VR", "3D Modeling", "WebRTC"],
        highlight: "VR Innovation",
        status: ProjectStatus::Beta,
        metrics: &[
            metric("destinations", "25+"),
            metric("users", "2000+"),
            metric("satisfaction", "96%"),
        ],
        features: &["360° environments", "Social VR", "Real-time weather"],
        demo_url: None,
        source_url: None,
    },
];
