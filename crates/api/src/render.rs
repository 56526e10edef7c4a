//! HTML fragment for the theme details modal.
//!
//! The dashboard injects `html_content` straight into the modal body, so all
//! text is escaped here. Rich-text fields are reduced to plain text first.

use std::fmt::{self, Write};

use tracker_core::action_status::{ActionStatus, StatusCounts};
use tracker_core::html::{escape, strip_tags};
use tracker_core::language::Language;

/// One Action row in the fragment, with text already resolved.
#[derive(Debug, Clone)]
pub struct ActionView<'a> {
    pub title: &'a str,
    pub status: ActionStatus,
    pub small_description: &'a str,
    pub update: &'a str,
}

/// One Objective section and its approved Actions.
#[derive(Debug, Clone)]
pub struct ObjectiveView<'a> {
    pub title: &'a str,
    pub actions: Vec<ActionView<'a>>,
}

struct Labels {
    progress: &'static str,
    objectives: &'static str,
    no_actions: &'static str,
    latest_update: &'static str,
    not_found_title: &'static str,
    not_found_message: &'static str,
}

const EN: Labels = Labels {
    progress: "Action Progress",
    objectives: "Objectives",
    no_actions: "No approved actions yet.",
    latest_update: "Latest update",
    not_found_title: "Theme Not Found",
    not_found_message: "This strategic theme does not exist or has been removed.",
};

const GA: Labels = Labels {
    progress: "Dul Chun Cinn na nGníomhartha",
    objectives: "Cuspóirí",
    no_actions: "Níl aon ghníomhartha ceadaithe fós.",
    latest_update: "An nuashonrú is déanaí",
    not_found_title: "Téama Gan Aimsiú",
    not_found_message: "Níl an téama straitéiseach seo ann nó baineadh é.",
};

fn labels(language: Language) -> &'static Labels {
    match language {
        Language::English => &EN,
        Language::Irish => &GA,
    }
}

fn plain(rich: &str) -> String {
    escape(strip_tags(rich).trim())
}

/// `(html_content, title)` for an unknown theme.
pub fn theme_not_found(language: Language) -> (String, &'static str) {
    let l = labels(language);
    (format!("<p>{}</p>", l.not_found_message), l.not_found_title)
}

/// Render the progress counters and the objective/action listing.
pub fn theme_details_fragment(
    counts: &StatusCounts,
    objectives: &[ObjectiveView<'_>],
    language: Language,
) -> String {
    let mut html = String::new();
    write_fragment(&mut html, counts, objectives, labels(language), language)
        .expect("writing to a String cannot fail");
    html
}

fn write_fragment(
    html: &mut String,
    counts: &StatusCounts,
    objectives: &[ObjectiveView<'_>],
    l: &Labels,
    language: Language,
) -> fmt::Result {
    write!(
        html,
        "<section class=\"theme-progress\"><h3>{}</h3><div class=\"progress-counters\">",
        l.progress
    )?;
    for (status, value) in [
        (ActionStatus::Completed, counts.completed),
        (ActionStatus::InProgress, counts.in_progress),
        (ActionStatus::NotStarted, counts.not_started),
    ] {
        write!(
            html,
            "<div class=\"progress-counter {token}\">\
             <span class=\"counter\" data-target=\"{value}\">0</span> \
             <span class=\"counter-label\">{label}</span>\
             <span class=\"counter-percent\">{percent}%</span></div>",
            token = status.token(),
            label = status.label(language),
            percent = counts.percent(value),
        )?;
    }
    html.push_str("</div></section>");

    write!(html, "<section class=\"theme-objectives\"><h3>{}</h3>", l.objectives)?;
    for objective in objectives {
        write!(
            html,
            "<article class=\"objective\"><h4>{}</h4>",
            escape(objective.title)
        )?;
        if objective.actions.is_empty() {
            write!(html, "<p class=\"no-actions\">{}</p>", l.no_actions)?;
        } else {
            html.push_str("<ul class=\"actions\">");
            for action in &objective.actions {
                write_action(html, action, l, language)?;
            }
            html.push_str("</ul>");
        }
        html.push_str("</article>");
    }
    html.push_str("</section>");
    Ok(())
}

fn write_action(
    html: &mut String,
    action: &ActionView<'_>,
    l: &Labels,
    language: Language,
) -> fmt::Result {
    write!(
        html,
        "<li class=\"action {token}\"><strong>{title}</strong> \
         <span class=\"status\">{status}</span>",
        token = action.status.token(),
        title = escape(action.title),
        status = action.status.label(language),
    )?;
    let summary = plain(action.small_description);
    if !summary.is_empty() {
        write!(html, "<p class=\"summary\">{summary}</p>")?;
    }
    let update = plain(action.update);
    if !update.is_empty() {
        write!(
            html,
            "<p class=\"update\"><em>{}:</em> {update}</p>",
            l.latest_update
        )?;
    }
    html.push_str("</li>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> StatusCounts {
        StatusCounts {
            completed: 1,
            in_progress: 2,
            not_started: 1,
        }
    }

    #[test]
    fn counters_carry_data_targets() {
        let html = theme_details_fragment(&counts(), &[], Language::English);
        assert!(html.contains("Action Progress"));
        assert!(html.contains("data-target=\"1\""));
        assert!(html.contains("data-target=\"2\""));
        assert!(html.contains("50%"));
    }

    #[test]
    fn text_is_escaped_and_rich_text_flattened() {
        let objectives = [ObjectiveView {
            title: "Skills & <Training>",
            actions: vec![ActionView {
                title: "Run <b>workshops</b>",
                status: ActionStatus::InProgress,
                small_description: "<p>Short</p>",
                update: "<p>First <em>cohort</em> done</p>",
            }],
        }];
        let html = theme_details_fragment(&counts(), &objectives, Language::English);
        assert!(html.contains("Skills &amp; &lt;Training&gt;"));
        assert!(html.contains("Run &lt;b&gt;workshops&lt;/b&gt;"));
        assert!(html.contains("First cohort done"));
        assert!(html.contains("Latest update"));
    }

    #[test]
    fn every_opened_element_is_closed() {
        let action = |title| ActionView {
            title,
            status: ActionStatus::Completed,
            small_description: "<p>Summary</p>",
            update: "Done",
        };
        let objectives = [
            ObjectiveView {
                title: "First",
                actions: vec![action("A"), action("B")],
            },
            ObjectiveView {
                title: "Second",
                actions: vec![],
            },
        ];
        let html = theme_details_fragment(&counts(), &objectives, Language::English);
        for tag in ["section", "article", "ul", "li", "div", "p"] {
            let opened = html.matches(&format!("<{tag}>")).count()
                + html.matches(&format!("<{tag} ")).count();
            let closed = html.matches(&format!("</{tag}>")).count();
            assert_eq!(opened, closed, "unbalanced <{tag}>");
        }
        assert_eq!(html.matches("<li ").count(), 2);
    }

    #[test]
    fn blank_update_is_omitted() {
        let objectives = [ObjectiveView {
            title: "O",
            actions: vec![ActionView {
                title: "A",
                status: ActionStatus::NotStarted,
                small_description: "",
                update: "",
            }],
        }];
        let html = theme_details_fragment(&counts(), &objectives, Language::English);
        assert!(!html.contains("class=\"update\""));
    }

    #[test]
    fn irish_labels() {
        let objectives = [ObjectiveView {
            title: "O",
            actions: vec![],
        }];
        let html = theme_details_fragment(&counts(), &objectives, Language::Irish);
        assert!(html.contains("Dul Chun Cinn na nGníomhartha"));
        assert!(html.contains("Críochnaithe"));
        assert!(html.contains("Níl aon ghníomhartha ceadaithe fós."));
    }

    #[test]
    fn not_found_messages() {
        let (html, title) = theme_not_found(Language::English);
        assert_eq!(
            html,
            "<p>This strategic theme does not exist or has been removed.</p>"
        );
        assert_eq!(title, "Theme Not Found");
        assert_eq!(theme_not_found(Language::Irish).1, "Téama Gan Aimsiú");
    }
}
