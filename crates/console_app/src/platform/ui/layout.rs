use console_core::AppViewModel;
use ratatui::layout::{Constraint, Layout, Rect};

/// Activity panel is only shown when the terminal is at least this wide.
const ACTIVITY_MIN_WIDTH: u16 = 100;
const ACTIVITY_WIDTH: u16 = 38;

/// Screen regions for one frame. Optional regions are absent when hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleLayout {
    pub usage: Option<Rect>,
    pub input: Rect,
    pub summary: Option<Rect>,
    pub results: Option<Rect>,
    pub activity: Option<Rect>,
    pub status: Rect,
}

pub fn compute(area: Rect, view: &AppViewModel) -> ConsoleLayout {
    let outer = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
    let (body, status) = (outer[0], outer[1]);

    let show_activity =
        view.usage_panel && !view.recent.is_empty() && body.width >= ACTIVITY_MIN_WIDTH;
    let (main, activity) = if show_activity {
        let split = Layout::horizontal([Constraint::Min(0), Constraint::Length(ACTIVITY_WIDTH)])
            .split(body);
        (split[0], Some(split[1]))
    } else {
        (body, None)
    };

    let mut constraints = Vec::with_capacity(4);
    if view.usage_panel {
        constraints.push(Constraint::Length(3));
    }
    if view.results_visible {
        constraints.push(Constraint::Length(7));
        constraints.push(Constraint::Length(3));
        constraints.push(Constraint::Min(3));
    } else {
        constraints.push(Constraint::Min(3));
    }
    let areas = Layout::vertical(constraints).split(main);

    let mut next = areas.iter().copied();
    let usage = if view.usage_panel { next.next() } else { None };
    let input = next.next().unwrap_or(main);
    let (summary, results) = if view.results_visible {
        (next.next(), next.next())
    } else {
        (None, None)
    };

    ConsoleLayout {
        usage,
        input,
        summary,
        results,
        activity,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_core::ActivityRowView;

    fn view() -> AppViewModel {
        AppViewModel {
            usage_panel: true,
            ..AppViewModel::default()
        }
    }

    #[test]
    fn idle_console_has_usage_input_and_status() {
        let layout = compute(Rect::new(0, 0, 80, 24), &view());

        assert_eq!(layout.usage, Some(Rect::new(0, 0, 80, 3)));
        assert_eq!(layout.input, Rect::new(0, 3, 80, 20));
        assert_eq!(layout.summary, None);
        assert_eq!(layout.results, None);
        assert_eq!(layout.status, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn visible_results_get_summary_and_table() {
        let view = AppViewModel {
            results_visible: true,
            usage_panel: false,
            ..AppViewModel::default()
        };
        let layout = compute(Rect::new(0, 0, 80, 24), &view);

        assert_eq!(layout.usage, None);
        assert_eq!(layout.input.height, 7);
        assert_eq!(layout.summary.map(|r| r.height), Some(3));
        assert_eq!(layout.results.map(|r| r.height), Some(13));
    }

    #[test]
    fn activity_panel_needs_history_and_width() {
        let mut view = view();
        view.recent.push(ActivityRowView {
            email: "a@x.com".to_string(),
            status: "Valid".to_string(),
            status_class: "status-valid".to_string(),
            time: "09:12".to_string(),
        });

        assert_eq!(compute(Rect::new(0, 0, 80, 24), &view).activity, None);
        let wide = compute(Rect::new(0, 0, 120, 24), &view);
        assert_eq!(wide.activity.map(|r| r.width), Some(ACTIVITY_WIDTH));
        assert_eq!(wide.input.width, 120 - ACTIVITY_WIDTH);
    }
}
