use crate::layout::ScheduleLayout;
use crate::models::{Progress, SlotView};
use crate::view::DayView;
use std::fmt::Write;
use std::sync::Arc;

/// Server-side copy of the editing form. Holds the day last rendered and
/// every edit mirrored into it since, and turns that into the index page.
#[derive(Debug, Clone)]
pub struct PageSurface {
    layout: Arc<ScheduleLayout>,
    day: Option<usize>,
    slots: Vec<SlotView>,
    progress: Option<Progress>,
}

impl PageSurface {
    pub fn new(layout: Arc<ScheduleLayout>) -> Self {
        Self {
            layout,
            day: None,
            slots: Vec::new(),
            progress: None,
        }
    }
}

impl DayView for PageSurface {
    fn render_day(&mut self, day: usize, slots: &[SlotView]) {
        self.day = Some(day);
        self.slots = slots.to_vec();
    }

    fn set_progress(&mut self, progress: Progress) {
        if self.day == Some(progress.day) {
            self.progress = Some(progress);
        }
    }

    fn read_day(&self, day: usize) -> Option<Vec<SlotView>> {
        (self.day == Some(day)).then(|| self.slots.clone())
    }

    fn update_slot(&mut self, day: usize, slot: usize, view: &SlotView) {
        if self.day != Some(day) {
            return;
        }
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = view.clone();
        }
    }
}

pub fn render_index(surface: &PageSurface) -> String {
    let layout = &surface.layout;
    let day = surface.day.unwrap_or(0);
    let day_name = layout.day_name(day).unwrap_or("");
    let progress = surface.progress.unwrap_or(Progress {
        day,
        completed: 0,
        total: layout.slot_count(),
    });

    fill_template(INDEX_HTML, |name| match name {
        "DAY_NAME" => Some(escape_html(day_name)),
        "DAY_TABS" => Some(render_tabs(layout, day)),
        "SLOTS" => Some(render_slots(layout, day, &surface.slots)),
        "COMPLETED" => Some(progress.completed.to_string()),
        "TOTAL" => Some(progress.total.to_string()),
        "PERCENT" => Some(progress.percent().to_string()),
        _ => None,
    })
}

// Single pass over the template: inserted values are never scanned again.
fn fill_template(template: &str, value: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = &after[..end];
                match value(name) {
                    Some(filled) => out.push_str(&filled),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_tabs(layout: &ScheduleLayout, active: usize) -> String {
    let mut html = String::new();
    for (index, name) in layout.days().iter().enumerate() {
        let class = if index == active { "day-tab active" } else { "day-tab" };
        let short: String = name.chars().take(3).collect();
        let _ = write!(
            html,
            r#"<form method="post" action="/day/show/{index}"><button class="{class}" type="submit" title="{full}">{short}</button></form>"#,
            full = escape_html(name),
            short = escape_html(&short),
        );
    }
    html
}

fn render_slots(layout: &ScheduleLayout, day: usize, slots: &[SlotView]) -> String {
    let mut html = String::new();
    for (index, time_slot) in layout.slots().iter().enumerate() {
        let value = slots.get(index).cloned().unwrap_or_default();
        let done = if value.completed { " completed" } else { "" };
        let checked = if value.completed { " checked" } else { "" };
        let _ = write!(
            html,
            r#"<div class="time-slot {period}{done}" data-day="{day}" data-slot="{index}">
  <div class="time-info">
    <input type="checkbox" class="time-checkbox" id="checkbox-{day}-{index}" data-day="{day}" data-slot="{index}"{checked} />
    <label class="time-label" for="checkbox-{day}-{index}">{time}</label>
  </div>
  <input type="text" class="task-input{done}" placeholder="Add your task..." data-day="{day}" data-slot="{index}" value="{text}" />
</div>
"#,
            period = time_slot.period.as_str(),
            time = escape_html(&time_slot.time),
            text = escape_html(&value.text),
        );
    }
    html
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
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

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Weekly Planner</title>
  <style>
    :root {
      --bg: #f6f1e7;
      --ink: #2b2a28;
      --muted: #6b675f;
      --accent: #2f4858;
      --morning: #fff4d6;
      --afternoon: #e3f1ff;
      --evening: #ece4ff;
      --done: #8fbf8a;
      --card: rgba(255, 255, 255, 0.9);
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
      display: grid;
      place-items: start center;
      padding: 28px 16px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: 0 20px 50px rgba(47, 72, 88, 0.16);
      padding: 28px;
      display: grid;
      gap: 20px;
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      margin: 0;
      font-family: Georgia, serif;
      font-size: 2rem;
    }

    .tabs {
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
    }

    .tabs form,
    header form {
      margin: 0;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      font: inherit;
      cursor: pointer;
      background: #e9e4da;
      color: var(--ink);
    }

    .day-tab.active {
      background: var(--accent);
      color: #fff;
    }

    .progress {
      display: grid;
      gap: 6px;
    }

    .progress-bar {
      height: 10px;
      border-radius: 999px;
      background: #e9e4da;
      overflow: hidden;
    }

    .progress-fill {
      height: 100%;
      background: var(--done);
      transition: width 200ms ease;
    }

    .time-slots {
      display: grid;
      gap: 6px;
    }

    .time-slot {
      display: grid;
      grid-template-columns: 180px 1fr;
      align-items: center;
      gap: 10px;
      padding: 8px 12px;
      border-radius: 12px;
    }

    .time-slot.morning { background: var(--morning); }
    .time-slot.afternoon { background: var(--afternoon); }
    .time-slot.evening { background: var(--evening); }
    .time-slot.completed { opacity: 0.7; }

    .time-label {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .task-input {
      width: 100%;
      border: 1px solid transparent;
      border-radius: 8px;
      padding: 6px 8px;
      font: inherit;
      background: rgba(255, 255, 255, 0.7);
    }

    .task-input.completed {
      text-decoration: line-through;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <form method="post" action="/day/prev"><button id="prev-day" type="submit">&larr;</button></form>
      <h1 class="current-day">{{DAY_NAME}}</h1>
      <form method="post" action="/day/next"><button id="next-day" type="submit">&rarr;</button></form>
    </header>

    <nav class="tabs">{{DAY_TABS}}</nav>

    <section class="progress">
      <div class="progress-bar"><div class="progress-fill" id="progress-fill" style="width: {{PERCENT}}%"></div></div>
      <span id="progress-text">{{COMPLETED}}/{{TOTAL}}</span>
    </section>

    <section class="time-slots">
{{SLOTS}}    </section>

    <form method="post" action="/day/clear"><button id="clear-day-btn" type="submit">Clear day</button></form>
  </main>

  <script>
    const post = (url, body) =>
      fetch(url, {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify(body),
      });

    const showProgress = (progress) => {
      document.getElementById("progress-fill").style.width = `${progress.percent}%`;
      document.getElementById("progress-text").textContent = `${progress.completed}/${progress.total}`;
    };

    const slotOf = (el) => ({
      day: Number(el.dataset.day),
      slot: Number(el.dataset.slot),
    });

    document.addEventListener("input", (e) => {
      if (e.target.classList.contains("task-input")) {
        post("/api/task", { ...slotOf(e.target), text: e.target.value });
      }
    });

    document.addEventListener("change", async (e) => {
      if (!e.target.classList.contains("time-checkbox")) {
        return;
      }
      const row = e.target.closest(".time-slot");
      row.classList.toggle("completed", e.target.checked);
      row.querySelector(".task-input").classList.toggle("completed", e.target.checked);
      const res = await post("/api/completion", { ...slotOf(e.target), checked: e.target.checked });
      if (res.ok) {
        showProgress(await res.json());
      }
    });

    document.addEventListener("keydown", async (e) => {
      const tag = e.target.tagName;
      if (tag !== "INPUT" && tag !== "TEXTAREA" && (e.key === "ArrowLeft" || e.key === "ArrowRight")) {
        e.preventDefault();
        await post("/api/navigate", { direction: e.key === "ArrowLeft" ? "prev" : "next" });
        window.location.reload();
        return;
      }
      if (e.key === "Enter" && e.target.classList.contains("task-input")) {
        const { day, slot } = slotOf(e.target);
        const next = document.querySelector(`.task-input[data-day="${day}"][data-slot="${slot + 1}"]`);
        if (next) {
          next.focus();
        }
      }
    });
  </script>
</body>
</html>
"#;
