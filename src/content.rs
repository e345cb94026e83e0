use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Portfolio {
    pub hero: Hero,
    pub projects: Vec<Project>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<Skill>,
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Hero {
    pub name: String,
    pub headline: String,
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tech: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExperienceEntry {
    pub id: String,
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// Self-assessed proficiency, 1..=5.
    #[serde(default = "default_skill_level")]
    pub level: u8,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Certification {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default = "default_true")]
    pub featured: bool,
}

fn default_skill_level() -> u8 {
    3
}

fn default_true() -> bool {
    true
}

/// One slide of a featured carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub id: String,
    pub title: String,
    pub caption: String,
}

impl Portfolio {
    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read content: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::content(format!("failed to parse content {}: {source}", path.display()))
        })?;
        parsed.validated()
    }

    pub fn validated(self) -> AppResult<Self> {
        check_unique_ids("projects", self.projects.iter().map(|p| p.id.as_str()))?;
        check_unique_ids("experience", self.experience.iter().map(|e| e.id.as_str()))?;
        check_unique_ids("skills", self.skills.iter().map(|s| s.id.as_str()))?;
        check_unique_ids(
            "certifications",
            self.certifications.iter().map(|c| c.id.as_str()),
        )?;
        Ok(self)
    }

    pub fn featured_skills(&self) -> Vec<Slide> {
        self.skills
            .iter()
            .filter(|skill| skill.featured)
            .map(|skill| Slide {
                id: skill.id.clone(),
                title: skill.name.clone(),
                caption: format!(
                    "{} {}",
                    skill.category,
                    level_bar(skill.level)
                )
                .trim()
                .to_string(),
            })
            .collect()
    }

    pub fn featured_certifications(&self) -> Vec<Slide> {
        self.certifications
            .iter()
            .filter(|cert| cert.featured)
            .map(|cert| Slide {
                id: cert.id.clone(),
                title: cert.name.clone(),
                caption: match cert.year {
                    Some(year) if !cert.issuer.is_empty() => format!("{} · {year}", cert.issuer),
                    Some(year) => year.to_string(),
                    None => cert.issuer.clone(),
                },
            })
            .collect()
    }

    /// Built-in content used when no content file is given.
    pub fn demo() -> Self {
        let text = |s: &str| s.to_string();
        Self {
            hero: Hero {
                name: text("Ada Example"),
                headline: text("Systems engineer · Rust · distributed storage"),
                summary: text(
                    "I build fast, boring infrastructure: storage engines, schedulers and the \
                     tooling around them.",
                ),
            },
            projects: vec![
                Project {
                    id: text("ledger"),
                    title: text("Ledger"),
                    summary: text("Append-only log store with segment compaction."),
                    tech: vec![text("rust"), text("tokio"), text("io_uring")],
                },
                Project {
                    id: text("tessellate"),
                    title: text("Tessellate"),
                    summary: text("Tile server that renders vector maps on demand."),
                    tech: vec![text("rust"), text("wgpu")],
                },
                Project {
                    id: text("quill"),
                    title: text("Quill"),
                    summary: text("Terminal markdown notebook with live preview."),
                    tech: vec![text("rust"), text("ratatui")],
                },
            ],
            experience: vec![
                ExperienceEntry {
                    id: text("acme-storage"),
                    role: text("Senior Engineer"),
                    company: text("Acme Storage"),
                    period: text("2021 - present"),
                    highlights: vec![
                        text("Led the rewrite of the replication pipeline."),
                        text("Cut p99 write latency by 40%."),
                    ],
                },
                ExperienceEntry {
                    id: text("widget-co"),
                    role: text("Backend Engineer"),
                    company: text("Widget Co"),
                    period: text("2017 - 2021"),
                    highlights: vec![text("Owned the billing event pipeline.")],
                },
            ],
            skills: vec![
                Skill {
                    id: text("rust"),
                    name: text("Rust"),
                    category: text("language"),
                    level: 5,
                    featured: true,
                },
                Skill {
                    id: text("postgres"),
                    name: text("PostgreSQL"),
                    category: text("database"),
                    level: 4,
                    featured: true,
                },
                Skill {
                    id: text("k8s"),
                    name: text("Kubernetes"),
                    category: text("platform"),
                    level: 3,
                    featured: true,
                },
                Skill {
                    id: text("go"),
                    name: text("Go"),
                    category: text("language"),
                    level: 3,
                    featured: false,
                },
            ],
            certifications: vec![
                Certification {
                    id: text("cka"),
                    name: text("Certified Kubernetes Administrator"),
                    issuer: text("CNCF"),
                    year: Some(2023),
                    featured: true,
                },
                Certification {
                    id: text("aws-sa"),
                    name: text("AWS Solutions Architect"),
                    issuer: text("Amazon Web Services"),
                    year: Some(2022),
                    featured: true,
                },
                Certification {
                    id: text("gcp-de"),
                    name: text("Professional Data Engineer"),
                    issuer: text("Google Cloud"),
                    year: Some(2021),
                    featured: true,
                },
                Certification {
                    id: text("terraform"),
                    name: text("Terraform Associate"),
                    issuer: text("HashiCorp"),
                    year: Some(2020),
                    featured: true,
                },
            ],
        }
    }
}

fn level_bar(level: u8) -> String {
    let level = level.clamp(1, 5) as usize;
    format!("{}{}", "●".repeat(level), "○".repeat(5 - level))
}

fn check_unique_ids<'a>(list: &str, ids: impl Iterator<Item = &'a str>) -> AppResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(AppError::content(format!("{list}: item id must not be empty")));
        }
        if !seen.insert(id) {
            return Err(AppError::content(format!("{list}: duplicate item id {id}")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::Portfolio;
    use crate::error::AppError;

    fn unique_temp_path(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("folio_content_{suffix}_{}_{}", process::id(), nanos));
        path
    }

    #[test]
    fn demo_content_is_valid_and_has_featured_slides() {
        let demo = Portfolio::demo().validated().expect("demo content should validate");
        assert_eq!(demo.featured_certifications().len(), 4);
        assert_eq!(demo.featured_skills().len(), 3);
        assert_eq!(demo.featured_skills()[0].caption, "language ●●●●●");
        assert_eq!(
            demo.featured_certifications()[0].caption,
            "CNCF · 2023"
        );
    }

    #[test]
    fn load_from_path_parses_partial_content() {
        let path = unique_temp_path("partial.toml");
        fs::write(
            &path,
            r#"
            [hero]
            name = "Grace"

            [[certifications]]
            id = "ocp"
            name = "Oracle Certified Professional"

            [[skills]]
            id = "cobol"
            name = "COBOL"
            featured = true
            "#,
        )
        .expect("content file should be written");

        let portfolio = Portfolio::load_from_path(&path).expect("content should parse");
        assert_eq!(portfolio.hero.name, "Grace");
        assert!(portfolio.projects.is_empty());
        assert_eq!(portfolio.skills[0].level, 3);
        assert!(portfolio.certifications[0].featured);
        assert_eq!(portfolio.featured_certifications()[0].caption, "");

        fs::remove_file(&path).expect("content file should be removed");
    }

    #[test]
    fn duplicate_item_ids_are_rejected() {
        let mut portfolio = Portfolio::demo();
        let duplicate = portfolio.projects[0].clone();
        portfolio.projects.push(duplicate);
        assert!(matches!(portfolio.validated(), Err(AppError::Content(_))));
    }

    #[test]
    fn missing_content_file_is_an_io_error() {
        let missing = unique_temp_path("missing.toml");
        assert!(matches!(
            Portfolio::load_from_path(&missing),
            Err(AppError::Io { .. })
        ));
    }
}
