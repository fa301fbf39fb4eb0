//! Plain-text views of the current screen, printed to stdout by the CLI.

use std::fmt::{self, Display, Formatter};

use crate::app::{App, Screen};
use crate::models::Priority;
use crate::pages::assessment::AssessmentPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::gap_analysis::GapAnalysisPage;
use crate::pages::layout::nav_items;
use crate::pages::progress::ProgressPage;
use crate::pages::resources::{ResourcesPage, DIFFICULTIES, KINDS};
use crate::pages::roadmap::RoadmapPage;
use crate::pages::roles::CareerRolesPage;
use crate::routes::{Access, Route};

pub struct View<'a>(pub &'a App);

impl Display for View<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let app = self.0;
        if let Some(route) = app.location() {
            header(f, app, route)?;
        }
        match app.screen() {
            Screen::Blank => Ok(()),
            Screen::Landing => landing(f),
            Screen::Login(page) => {
                writeln!(f, "Sign in to continue your journey.")?;
                if page.is_submitting() {
                    writeln!(f, "Signing in...")?;
                }
                writeln!(f, "  skillgap login --email <EMAIL> --password <PASSWORD>")
            }
            Screen::Register(page) => {
                writeln!(f, "Create an account to start assessing your skills.")?;
                if page.is_submitting() {
                    writeln!(f, "Creating account...")?;
                }
                writeln!(
                    f,
                    "  skillgap register --name <NAME> --email <EMAIL> --password <PASSWORD>"
                )
            }
            Screen::Dashboard(page) => dashboard(f, page),
            Screen::Roles(page) => roles(f, page),
            Screen::Assessment(page) => assessment(f, page),
            Screen::GapAnalysis(page) => gap_analysis(f, page),
            Screen::Roadmap(page) => roadmap(f, page),
            Screen::Resources(page) => resources(f, page),
            Screen::Progress(page) => progress(f, page),
        }
    }
}

fn header(f: &mut Formatter<'_>, app: &App, route: &Route) -> fmt::Result {
    writeln!(f, "== SkillGap :: {} ({route}) ==", app.screen().name())?;
    if route.access() == Access::Protected {
        let nav: Vec<String> = nav_items()
            .iter()
            .map(|item| {
                if &item.route == route {
                    format!("[{}]", item.label)
                } else {
                    item.label.to_string()
                }
            })
            .collect();
        writeln!(f, "{}", nav.join(" | "))?;
        if let Some(user) = app.session().user() {
            writeln!(f, "Signed in as {} <{}>", user.name, user.email)?;
        }
    }
    writeln!(f)
}

fn landing(f: &mut Formatter<'_>) -> fmt::Result {
    writeln!(f, "Bridge the gap between where you are and where you want to be.")?;
    writeln!(f, "Assess your skills against a career role, see the gaps and get a roadmap.")?;
    writeln!(f)?;
    writeln!(f, "  Get started: /register")?;
    writeln!(f, "  Sign in:     /login")
}

fn dashboard(f: &mut Formatter<'_>, page: &DashboardPage) -> fmt::Result {
    match page.summary() {
        Some(summary) => {
            writeln!(f, "Assessments:      {}", summary.assessment_count)?;
            writeln!(f, "Average progress: {}%", summary.average_progress)?;
            writeln!(f, "Tracked roles:    {}", summary.tracked_roles)?;
        }
        None => writeln!(f, "Loading...")?,
    }
    writeln!(f)?;

    if !page.has_assessments() {
        writeln!(f, "No assessments yet. Pick a career role to get started: /roles")?;
        return Ok(());
    }
    writeln!(f, "Recent assessments:")?;
    for assessment in page.assessments() {
        write!(f, "  {} for {}", assessment.id, assessment.career_role_id)?;
        if let Some(at) = assessment.created_at {
            write!(f, " on {}", at.format("%Y-%m-%d"))?;
        }
        writeln!(f, " ({} skills rated)", assessment.skills.len())?;
    }
    for record in page.progress() {
        writeln!(
            f,
            "  progress {}: {}%",
            record.career_role_id, record.overall_progress
        )?;
    }
    Ok(())
}

fn roles(f: &mut Formatter<'_>, page: &CareerRolesPage) -> fmt::Result {
    if page.roles().is_empty() {
        return writeln!(f, "No career roles available.");
    }
    for role in page.roles() {
        writeln!(f, "{} [{}]", role.title, role.id)?;
        writeln!(f, "  {}", role.description)?;
        writeln!(
            f,
            "  Salary {} | Growth {} | {} skills ({})",
            role.average_salary,
            role.growth_rate,
            role.required_skills.len(),
            role.categories().join(", ")
        )?;
    }
    Ok(())
}

fn assessment(f: &mut Formatter<'_>, page: &AssessmentPage) -> fmt::Result {
    let Some(role) = page.role() else {
        return writeln!(f, "Role details unavailable.");
    };
    writeln!(f, "Rate your skills for {}", role.title)?;
    for (rating, required) in page.ratings().iter().zip(&role.required_skills) {
        writeln!(
            f,
            "  {:<24} {}  (target: {})",
            rating.skill_name, rating.current_level, required.level
        )?;
    }
    if page.is_submitting() {
        writeln!(f, "Submitting...")?;
    }
    Ok(())
}

fn gap_analysis(f: &mut Formatter<'_>, page: &GapAnalysisPage) -> fmt::Result {
    let Some(analysis) = page.analysis() else {
        return writeln!(f, "No analysis available.");
    };
    writeln!(f, "Readiness: {:.1}%", analysis.readiness_score)?;
    writeln!(f, "{}", analysis.verdict())?;
    writeln!(f)?;

    for priority in [Priority::High, Priority::Medium, Priority::Low] {
        let gaps: Vec<_> = analysis.gaps_with_priority(priority).collect();
        if gaps.is_empty() {
            continue;
        }
        writeln!(f, "{priority} priority:")?;
        for gap in gaps {
            writeln!(
                f,
                "  {} ({}): level {} of {}, gap {}",
                gap.skill,
                gap.category.as_deref().unwrap_or("General"),
                gap.current_level,
                gap.required_level,
                gap.gap
            )?;
        }
    }

    writeln!(f)?;
    writeln!(f, "Current vs required:")?;
    for point in analysis.radar_points() {
        writeln!(
            f,
            "  {:<18} {} / {}",
            point.skill, point.current, point.required
        )?;
    }
    if !analysis.ai_insights.is_empty() {
        writeln!(f)?;
        writeln!(f, "Insights: {}", analysis.ai_insights)?;
    }
    if page.is_generating_roadmap() {
        writeln!(f, "Generating roadmap...")?;
    }
    Ok(())
}

fn roadmap(f: &mut Formatter<'_>, page: &RoadmapPage) -> fmt::Result {
    let Some(roadmap) = page.roadmap() else {
        return writeln!(f, "Roadmap unavailable.");
    };
    writeln!(f, "Total duration: {}", roadmap.total_duration)?;
    for (step, item) in roadmap.roadmap_items.iter().enumerate() {
        writeln!(
            f,
            "{}. {} [{}] {}",
            step + 1,
            item.skill,
            item.priority,
            item.estimated_time
        )?;
        for milestone in &item.milestones {
            writeln!(f, "   - {milestone}")?;
        }
        for resource in &item.resources {
            writeln!(f, "   > {resource}")?;
        }
    }
    if !roadmap.ai_recommendations.is_empty() {
        writeln!(f)?;
        writeln!(f, "Recommendations: {}", roadmap.ai_recommendations)?;
    }
    Ok(())
}

fn resources(f: &mut Formatter<'_>, page: &ResourcesPage) -> fmt::Result {
    let filter = page.filter();
    writeln!(
        f,
        "Search: \"{}\" | Difficulty: {} ({}) | Type: {} ({})",
        filter.search,
        filter.difficulty,
        DIFFICULTIES.join("/"),
        filter.kind,
        KINDS.join("/")
    )?;
    let visible = page.visible();
    writeln!(f, "Showing {} of {} resources", visible.len(), page.total())?;
    for resource in visible {
        writeln!(
            f,
            "  {} [{} | {} | {}]",
            resource.title, resource.kind, resource.difficulty, resource.duration
        )?;
        writeln!(f, "    {}", resource.description)?;
        writeln!(f, "    skills: {}", resource.skills.join(", "))?;
        writeln!(f, "    {}", resource.url)?;
    }
    Ok(())
}

fn progress(f: &mut Formatter<'_>, page: &ProgressPage) -> fmt::Result {
    if page.records().is_empty() {
        return writeln!(f, "No progress tracked yet.");
    }
    for record in page.records() {
        writeln!(
            f,
            "{}: {}%",
            page.role_title(&record.career_role_id),
            record.overall_progress
        )?;
        for skill in &record.skill_progress {
            let mark = if skill.is_complete() { "✓" } else { " " };
            write!(f, "  {mark} {:<24} {:>3}%", skill.skill, skill.progress)?;
            if skill.notes.is_empty() {
                writeln!(f)?;
            } else {
                writeln!(f, "  {}", skill.notes)?;
            }
        }
    }
    Ok(())
}
