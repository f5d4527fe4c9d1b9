//! Widget layout and user intents. Rendering reads the view model; every
//! interaction comes back as a `Msg` for the state machine.

use marker_core::{AppViewModel, Msg, Notice, SessionState};

pub fn draw(ctx: &egui::Context, view: &AppViewModel, keyword_input: &mut String) -> Vec<Msg> {
    let mut msgs = Vec::new();

    egui::TopBottomPanel::top("config").show(ctx, |ui| {
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            if ui.button("Choose PDF folder…").clicked() {
                if let Some(folder) = rfd::FileDialog::new()
                    .set_title("Select PDF source folder")
                    .pick_folder()
                {
                    msgs.push(Msg::SourceFolderPicked(folder));
                }
            }
            match &view.source_folder {
                Some(folder) => ui.label(folder.display().to_string()),
                None => ui.label("—"),
            };
        });

        ui.horizontal(|ui| {
            if ui.button("Choose output folder…").clicked() {
                // Cancelling the dialog clears the choice back to in-place.
                msgs.push(Msg::DestFolderPicked(
                    rfd::FileDialog::new()
                        .set_title("Select output folder (optional)")
                        .pick_folder(),
                ));
            }
            match &view.dest_folder {
                Some(folder) => ui.label(folder.display().to_string()),
                None => ui.weak("(same as source)"),
            };
        });

        ui.add_space(4.0);

        ui.horizontal(|ui| {
            if ui.button("Load keywords file…").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Open keywords text file")
                    .add_filter("Text", &["txt"])
                    .pick_file()
                {
                    match marker_engine::load_keyword_file(&path) {
                        Ok(keywords) => msgs.push(Msg::KeywordsLoaded(keywords)),
                        Err(err) => msgs.push(Msg::KeywordFileFailed(err.to_string())),
                    }
                }
            }
            let edit = ui.add(
                egui::TextEdit::singleline(keyword_input)
                    .hint_text("keyword, another phrase, …")
                    .desired_width(280.0),
            );
            if edit.changed() {
                msgs.push(Msg::KeywordsEdited(keyword_input.clone()));
            }
            ui.label(format!("{} keyword(s)", view.keyword_count));
        });

        ui.add_space(4.0);

        let idle = view.session == SessionState::Idle;
        if ui
            .add_enabled(idle, egui::Button::new("Start highlighting"))
            .clicked()
        {
            msgs.push(Msg::StartClicked);
        }

        ui.add_space(6.0);
    });

    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(4.0);
        let fraction = if view.progress_total > 0 {
            view.progress_done as f32 / view.progress_total as f32
        } else {
            0.0
        };
        ui.add(
            egui::ProgressBar::new(fraction)
                .text(format!("{} / {}", view.progress_done, view.progress_total)),
        );
        if let Some(summary) = &view.summary {
            ui.strong(summary);
        }
        ui.add_space(4.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for line in &view.log {
                    ui.monospace(line);
                }
            });
    });

    msgs
}

/// Blocking modal, shown once per notice.
pub fn show_notice(notice: &Notice) {
    let level = if notice.informational() {
        rfd::MessageLevel::Info
    } else {
        rfd::MessageLevel::Error
    };
    rfd::MessageDialog::new()
        .set_level(level)
        .set_title(notice.title())
        .set_description(notice.text())
        .show();
}
