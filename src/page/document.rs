use crate::content::Portfolio;
use crate::error::AppResult;
use crate::sync::{Section, SectionId, SectionRegistry};

/// Rows taken by a carousel slot: slide title, caption and dot indicators.
pub const CAROUSEL_ROWS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarouselSlot {
    Skills,
    Certifications,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Title(String),
    Heading(String),
    Text(String),
    Muted(String),
    Bullet(String),
    Carousel(CarouselSlot),
    Blank,
}

impl Block {
    pub fn rows(&self) -> u32 {
        match self {
            Self::Carousel(_) => CAROUSEL_ROWS,
            _ => 1,
        }
    }
}

/// Rendering model of one section: its static blocks, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub section: Section,
    pub blocks: Vec<Block>,
}

impl SectionView {
    pub fn id(&self) -> &SectionId {
        &self.section.id
    }

    pub fn rows(&self) -> u32 {
        self.blocks.iter().map(Block::rows).sum()
    }
}

pub fn build_document(portfolio: &Portfolio) -> AppResult<(SectionRegistry, Vec<SectionView>)> {
    let views = vec![
        hero_view(portfolio),
        projects_view(portfolio),
        experience_view(portfolio),
        skills_view(portfolio),
        certifications_view(portfolio),
    ];
    let registry = SectionRegistry::new(views.iter().map(|view| view.section.clone()).collect())?;
    Ok((registry, views))
}

fn hero_view(portfolio: &Portfolio) -> SectionView {
    let hero = &portfolio.hero;
    let mut blocks = vec![Block::Blank, Block::Title(hero.name.clone())];
    if !hero.headline.is_empty() {
        blocks.push(Block::Muted(hero.headline.clone()));
    }
    blocks.push(Block::Blank);
    if !hero.summary.is_empty() {
        blocks.push(Block::Text(hero.summary.clone()));
    }
    blocks.push(Block::Blank);
    SectionView {
        section: Section::new("home", "/", "Home", 0),
        blocks,
    }
}

fn projects_view(portfolio: &Portfolio) -> SectionView {
    let mut blocks = vec![Block::Heading("Projects".to_string()), Block::Blank];
    for project in &portfolio.projects {
        blocks.push(Block::Text(project.title.clone()));
        if !project.summary.is_empty() {
            blocks.push(Block::Muted(project.summary.clone()));
        }
        if !project.tech.is_empty() {
            blocks.push(Block::Bullet(project.tech.join(" · ")));
        }
        blocks.push(Block::Blank);
    }
    with_empty_note(&mut blocks, portfolio.projects.is_empty(), "No projects yet.");
    SectionView {
        section: Section::new("projects", "/projects", "Projects", 1),
        blocks,
    }
}

fn experience_view(portfolio: &Portfolio) -> SectionView {
    let mut blocks = vec![Block::Heading("Experience".to_string()), Block::Blank];
    for entry in &portfolio.experience {
        blocks.push(Block::Text(format!("{} · {}", entry.role, entry.company)));
        if !entry.period.is_empty() {
            blocks.push(Block::Muted(entry.period.clone()));
        }
        blocks.extend(entry.highlights.iter().cloned().map(Block::Bullet));
        blocks.push(Block::Blank);
    }
    with_empty_note(&mut blocks, portfolio.experience.is_empty(), "No experience listed.");
    SectionView {
        section: Section::new("experience", "/experience", "Experience", 2),
        blocks,
    }
}

fn skills_view(portfolio: &Portfolio) -> SectionView {
    let mut blocks = vec![Block::Heading("Skills".to_string()), Block::Blank];
    let featured = portfolio.featured_skills();
    with_carousel(&mut blocks, CarouselSlot::Skills, !featured.is_empty());
    with_empty_note(&mut blocks, featured.is_empty(), "No featured skills.");
    let others: Vec<&str> = portfolio
        .skills
        .iter()
        .filter(|skill| !skill.featured)
        .map(|skill| skill.name.as_str())
        .collect();
    if !others.is_empty() {
        blocks.push(Block::Muted(format!("Also: {}", others.join(", "))));
        blocks.push(Block::Blank);
    }
    SectionView {
        section: Section::new("skills", "/skills", "Skills", 3),
        blocks,
    }
}

fn certifications_view(portfolio: &Portfolio) -> SectionView {
    let mut blocks = vec![Block::Heading("Certifications".to_string()), Block::Blank];
    let featured = portfolio.featured_certifications();
    with_carousel(&mut blocks, CarouselSlot::Certifications, !featured.is_empty());
    with_empty_note(&mut blocks, featured.is_empty(), "No certifications yet.");
    SectionView {
        section: Section::new("certifications", "/certifications", "Certifications", 4),
        blocks,
    }
}

/// A carousel with nothing to show takes no rows at all.
fn with_carousel(blocks: &mut Vec<Block>, slot: CarouselSlot, has_slides: bool) {
    if has_slides {
        blocks.push(Block::Carousel(slot));
        blocks.push(Block::Blank);
    }
}

fn with_empty_note(blocks: &mut Vec<Block>, empty: bool, note: &str) {
    if empty {
        blocks.push(Block::Muted(note.to_string()));
        blocks.push(Block::Blank);
    }
}
