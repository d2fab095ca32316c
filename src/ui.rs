use crate::models::{CompletionPrompt, DayConfig, DayStatus, ProgressSummary, View};
use crate::session::Session;
use crate::summary::build_summary;
use chrono::{DateTime, Utc};

pub fn render_view(session: &Session, now: DateTime<Utc>) -> String {
    let (title, body) = match (session.view, session.current_user.as_ref()) {
        (View::Dashboard, Some(user)) => ("Dashboard", render_dashboard(&build_summary(user, now))),
        (View::DayDetail, Some(_)) => match session.viewing_day() {
            Some(day) => (day.title, render_day(session, day)),
            None => ("Sign in", render_login(session)),
        },
        (View::Completion, Some(_)) => ("Done", render_completion()),
        _ => ("Sign in", render_login(session)),
    };

    PAGE_HTML
        .replace("{{TITLE}}", &escape(title))
        .replace("{{BODY}}", &body)
}

fn render_login(session: &Session) -> String {
    let (heading, subtitle, submit, switch) = if session.is_login_mode {
        (
            "Sign in",
            "Welcome back! Enter your username.",
            "Continue",
            "No account yet? Register here",
        )
    } else {
        (
            "Create an account",
            "Start warming up your number today.",
            "Create account",
            "Already registered? Sign in here",
        )
    };
    let error = session
        .login_error
        .as_deref()
        .map(|message| format!(r#"<p class="error">{}</p>"#, escape(message)))
        .unwrap_or_default();

    format!(
        r#"<section class="card narrow">
  <h1>{heading}</h1>
  <p class="subtitle">{subtitle}</p>
  <form method="post" action="/auth" class="stack">
    <label for="name">Username</label>
    <input id="name" name="name" type="text" placeholder="e.g. dana_cohen" autocomplete="off" />
    {error}
    <button class="primary" type="submit">{submit}</button>
  </form>
  <form method="post" action="/auth/mode">
    <button class="link" type="submit">{switch}</button>
  </form>
</section>"#
    )
}

fn render_dashboard(summary: &ProgressSummary) -> String {
    let mut timeline = String::new();
    for entry in &summary.timeline {
        let (class, marker) = match entry.status {
            DayStatus::Completed => ("completed", "&#10003;".to_string()),
            DayStatus::Open => ("open", entry.id.to_string()),
            DayStatus::Locked => ("locked", "&#128274;".to_string()),
        };
        let content = format!(
            r#"<span class="marker">{marker}</span><span class="text"><strong>{}</strong><small>{}</small></span>"#,
            escape(entry.title),
            escape(entry.description),
        );
        if entry.status == DayStatus::Locked {
            timeline.push_str(&format!(r#"<li class="day {class}"><div class="row">{content}</div></li>"#));
        } else {
            timeline.push_str(&format!(
                r#"<li class="day {class}"><form method="post" action="/days/{}/open"><button class="row" type="submit">{content}</button></form></li>"#,
                entry.id
            ));
        }
    }

    format!(
        r#"<header class="bar">
  <span class="brand">WARM-UP</span>
  <form method="post" action="/logout"><button class="link" type="submit">Log out</button></form>
</header>
<section class="card">
  <h1>Hello, {username}</h1>
  <p class="subtitle">Progress: {done} of {total} days</p>
  <div class="progress"><div style="width: {percent}%"></div></div>
</section>
<ol class="timeline">{timeline}</ol>"#,
        username = escape(&summary.username),
        done = summary.completed_count,
        total = summary.total_days,
        percent = summary.percent,
    )
}

fn render_day(session: &Session, day: &DayConfig) -> String {
    let gauge: String = day
        .gauge()
        .iter()
        .map(|lit| if *lit { r#"<i class="lit"></i>"# } else { "<i></i>" })
        .collect();

    let mut tasks = String::new();
    for task in day.tasks {
        let checked = session.completed_tasks_in_day.contains(task.id);
        tasks.push_str(&format!(
            r#"<li><form method="post" action="/tasks/{id}/toggle"><button class="task{state}" type="submit"><span class="box">{mark}</span>{text}</button></form></li>"#,
            id = task.id,
            state = if checked { " checked" } else { "" },
            mark = if checked { "&#10003;" } else { "" },
            text = escape(task.text),
        ));
    }

    let prompt = session
        .completion_prompt()
        .map(render_prompt)
        .unwrap_or_default();

    format!(
        r#"<header class="bar">
  <form method="post" action="/dashboard"><button class="link" type="submit">&larr; Back</button></form>
  <span class="brand">{title}</span>
</header>
<section class="card hero">
  <h1>{title}</h1>
  <p>{description}</p>
  <div class="gauge">Activity level: {gauge}</div>
</section>
<h3>Today's tasks</h3>
<ul class="tasks">{tasks}</ul>
{prompt}"#,
        title = escape(day.title),
        description = escape(day.description),
    )
}

fn render_prompt(prompt: CompletionPrompt) -> String {
    let (heading, text, action, label) = match prompt {
        CompletionPrompt::ReturnToDashboard { already_completed: true } => (
            "This day is already done",
            "Every task here was checked before.",
            "/dashboard",
            "Back to dashboard",
        ),
        CompletionPrompt::ReturnToDashboard { already_completed: false } => (
            "All tasks checked",
            "This is an earlier day of your program.",
            "/dashboard",
            "Back to dashboard",
        ),
        CompletionPrompt::Advance { finishes_program } => (
            "Day complete!",
            "You finished every task for today. Your number is warming up nicely.",
            "/day/complete",
            if finishes_program { "Finish the program" } else { "Continue to the next day" },
        ),
    };

    format!(
        r#"<div class="overlay"><div class="card narrow">
  <h3>{heading}</h3>
  <p class="subtitle">{text}</p>
  <form method="post" action="{action}"><button class="primary" type="submit">{label}</button></form>
</div></div>"#
    )
}

fn render_completion() -> String {
    r#"<section class="card narrow center">
  <div class="trophy">&#127942;</div>
  <h1>Well done!</h1>
  <p class="subtitle">Your number is warmed up and ready to be connected.</p>
  <p>You have completed all 10 days of the warm-up program.</p>
  <form method="post" action="/dashboard"><button class="primary" type="submit">Back to dashboard</button></form>
</section>"#
        .to_string()
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}} | Warm-up</title>
  <style>
    :root {
      --bg: #f8fafc;
      --ink: #1e293b;
      --muted: #64748b;
      --teal: #14b8a6;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(15, 23, 42, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
    }

    main {
      width: min(480px, 100%);
      margin: 0 auto;
      padding: 24px 18px 48px;
      display: grid;
      gap: 18px;
    }

    .card {
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 24px;
    }

    .narrow {
      max-width: 420px;
      margin: 0 auto;
      width: 100%;
    }

    .center {
      text-align: center;
    }

    .hero {
      background: linear-gradient(135deg, var(--teal), #0ea5e9);
      color: white;
    }

    h1 {
      margin: 0 0 6px;
      font-size: 1.6rem;
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
    }

    .stack {
      display: grid;
      gap: 10px;
      margin: 18px 0 8px;
    }

    input {
      padding: 12px 14px;
      border-radius: 12px;
      border: 1px solid #e2e8f0;
      font-size: 1rem;
    }

    button {
      font: inherit;
      cursor: pointer;
    }

    .primary {
      width: 100%;
      border: none;
      border-radius: 999px;
      padding: 14px 18px;
      background: var(--teal);
      color: white;
      font-weight: 600;
    }

    .link {
      border: none;
      background: none;
      color: var(--teal);
    }

    .error {
      margin: 0;
      color: #ef4444;
      font-size: 0.9rem;
    }

    .bar {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .brand {
      font-weight: 700;
      color: var(--teal);
    }

    .progress {
      margin-top: 14px;
      height: 10px;
      border-radius: 999px;
      background: #e2e8f0;
      overflow: hidden;
    }

    .progress div {
      height: 100%;
      background: var(--teal);
    }

    .timeline, .tasks {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 12px;
    }

    .row, .task {
      width: 100%;
      display: flex;
      gap: 14px;
      align-items: center;
      text-align: left;
      padding: 14px;
      border-radius: 18px;
      border: 2px solid #f1f5f9;
      background: var(--card);
      color: inherit;
    }

    .day.locked .row {
      opacity: 0.6;
      cursor: not-allowed;
    }

    .day.open .row {
      border-color: var(--teal);
    }

    .marker, .box {
      flex-shrink: 0;
      width: 40px;
      height: 40px;
      border-radius: 50%;
      display: grid;
      place-items: center;
      border: 3px solid #cbd5e1;
      font-weight: 700;
    }

    .day.completed .marker {
      background: var(--teal);
      border-color: var(--teal);
      color: white;
    }

    .text {
      display: grid;
      gap: 4px;
    }

    .text small {
      color: var(--muted);
    }

    .box {
      width: 24px;
      height: 24px;
      border-radius: 6px;
      border-width: 2px;
    }

    .task.checked {
      background: #f0fdf4;
      border-color: #bbf7d0;
      color: var(--muted);
      text-decoration: line-through;
    }

    .task.checked .box {
      background: #22c55e;
      border-color: #22c55e;
      color: white;
    }

    .gauge i {
      display: inline-block;
      width: 8px;
      height: 8px;
      margin-left: 4px;
      border-radius: 50%;
      background: rgba(255, 255, 255, 0.3);
    }

    .gauge i.lit {
      background: white;
    }

    .overlay {
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.5);
      display: grid;
      place-items: center;
      padding: 16px;
    }

    .trophy {
      font-size: 3rem;
    }
  </style>
</head>
<body>
  <main>
{{BODY}}
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UserProgress, UsersStore};
    use crate::session::Intent;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap()
    }

    #[test]
    fn login_page_escapes_error_text() {
        let session = Session {
            login_error: Some("<b>nope</b>".into()),
            ..Session::default()
        };
        let html = render_view(&session, now());
        assert!(html.contains("Create an account"));
        assert!(html.contains("&lt;b&gt;nope&lt;/b&gt;"));
    }

    #[test]
    fn dashboard_links_only_unlocked_days() {
        let mut user = UserProgress::new("dana", now());
        user.completed_days = vec![1];
        user.current_day = 2;
        let session = Session {
            view: View::Dashboard,
            current_user: Some(user),
            ..Session::default()
        };

        let html = render_view(&session, now());
        assert!(html.contains("Progress: 1 of 10 days"));
        assert!(html.contains(r#"action="/days/1/open""#));
        assert!(html.contains(r#"action="/days/2/open""#));
        assert!(!html.contains(r#"action="/days/3/open""#));
    }

    #[test]
    fn day_page_shows_advance_prompt_when_all_checked() {
        let mut store = UsersStore::default();
        let mut session = Session::default()
            .apply(Intent::SubmitAuth { name: "dana".into() }, &mut store, now())
            .session;
        session = session.apply(Intent::SelectDay { id: 1 }, &mut store, now()).session;
        let html = render_view(&session, now());
        assert!(!html.contains(r#"action="/day/complete""#));

        for task in session.viewing_day().unwrap().task_ids() {
            session = session
                .apply(Intent::ToggleTask { id: task.to_owned() }, &mut store, now())
                .session;
        }
        let html = render_view(&session, now());
        assert!(html.contains(r#"action="/day/complete""#));
        assert!(html.contains("Continue to the next day"));
    }
}
