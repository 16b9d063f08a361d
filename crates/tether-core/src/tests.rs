#[cfg(test)]
mod tests {
    use crate::headless::{HostCall, RecordingHost};
    use crate::*;

    fn window_with_button(ui: &mut Ui, host: &mut RecordingHost, label: &str) -> bool {
        let mut pressed = false;
        ui.frame(host, |ui| {
            ui.begin_window("W");
            pressed = ui.button(label);
            ui.end_window();
        });
        pressed
    }

    fn control_id(host: &RecordingHost, label: &str) -> ControlId {
        let h = host.find(WidgetKind::Button, label).unwrap();
        host.control_id_of(h).unwrap()
    }

    #[test]
    fn test_empty_window_is_idempotent() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();

        let first = ui.frame(&mut host, |ui| {
            ui.begin_window("T");
            ui.end_window();
        });
        assert_eq!(first.stats.created, 1);
        assert_eq!(first.stats.revealed, 1);
        assert_eq!(host.create_count(), 1);
        host.take_calls();

        for _ in 0..4 {
            let f = ui.frame(&mut host, |ui| {
                ui.begin_window("T");
                ui.end_window();
            });
            assert!(f.stats.is_quiet());
        }
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_same_label_reuses_entry() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();

        window_with_button(&mut ui, &mut host, "Test");
        let handle = host.find(WidgetKind::Button, "Test").unwrap();
        window_with_button(&mut ui, &mut host, "Test");

        assert_eq!(host.create_count(), 2);
        assert_eq!(ui.registry().len(), 2);
        assert_eq!(host.find(WidgetKind::Button, "Test"), Some(handle));
    }

    #[test]
    fn test_press_round_trip() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();

        assert!(!window_with_button(&mut ui, &mut host, "Test"));
        assert_eq!(host.create_count(), 2);

        host.activate(control_id(&host, "Test"));
        assert!(window_with_button(&mut ui, &mut host, "Test"));
        assert!(!window_with_button(&mut ui, &mut host, "Test"));
    }

    #[test]
    fn test_close_is_sticky() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();

        let mut open = false;
        let run = |ui: &mut Ui, host: &mut RecordingHost, open: &mut bool| {
            ui.frame(host, |ui| {
                *open = ui.begin_window("W");
                ui.button("Test");
                ui.end_window();
            });
        };

        run(&mut ui, &mut host, &mut open);
        assert!(open);

        let win = host.find(WidgetKind::Window, "W").unwrap();
        host.request_close(win);
        run(&mut ui, &mut host, &mut open);
        assert!(!open);

        host.activate(control_id(&host, "Test"));
        run(&mut ui, &mut host, &mut open);
        assert!(!open);
        run(&mut ui, &mut host, &mut open);
        assert!(!open);

        // Still declared, so still alive.
        assert!(host.is_live(win));
    }

    #[test]
    fn test_undeclared_widget_is_destroyed_next_frame() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();

        ui.frame(&mut host, |ui| {
            ui.window("W", |ui| {
                ui.button("A");
                ui.button("B");
            });
        });
        let b = host.find(WidgetKind::Button, "B").unwrap();

        let f = ui.frame(&mut host, |ui| {
            ui.window("W", |ui| {
                ui.button("A");
            });
        });
        assert_eq!(f.stats.destroyed, 1);
        assert!(host.calls().contains(&HostCall::Destroy(b)));
        assert!(!host.is_live(b));
        assert_eq!(ui.registry().len(), 2);
    }

    #[test]
    fn test_capacity_drops_tail_only() {
        let mut ui = Ui::with_config(UiConfig::default().with_max_widgets(3));
        let mut host = RecordingHost::new();
        let labels = ["b0", "b1", "b2", "b3"];

        let frame = |ui: &mut Ui, host: &mut RecordingHost| {
            let mut results = Vec::new();
            let f = ui.frame(host, |ui| {
                ui.begin_window("W");
                for l in labels {
                    results.push(ui.button(l));
                }
                ui.end_window();
            });
            (f, results)
        };

        let (f, results) = frame(&mut ui, &mut host);
        assert_eq!(f.declared, 3);
        assert_eq!(f.dropped, 2);
        assert_eq!(results, vec![false; 4]);
        assert_eq!(host.create_count(), 3);
        assert!(host.find(WidgetKind::Button, "b2").is_none());

        host.activate(control_id(&host, "b1"));
        let (_, results) = frame(&mut ui, &mut host);
        assert_eq!(results, vec![false, true, false, false]);
        assert_eq!(host.create_count(), 3);
    }

    #[test]
    fn test_keyed_text_updates_in_place() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();

        ui.frame(&mut host, |ui| {
            ui.window("W", |ui| ui.text_keyed("status", "press it!"));
        });
        let h = host.find(WidgetKind::Text, "press it!").unwrap();
        host.take_calls();

        let f = ui.frame(&mut host, |ui| {
            ui.window("W", |ui| ui.text_keyed("status", "pressed"));
        });
        assert_eq!(f.stats.created, 0);
        assert_eq!(f.stats.text_updates, 1);
        assert_eq!(host.calls(), &[HostCall::SetText(h, "pressed".into())]);
    }

    #[test]
    fn test_unkeyed_text_change_replaces_control() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();

        ui.frame(&mut host, |ui| {
            ui.window("W", |ui| ui.text("press it!"));
        });
        let f = ui.frame(&mut host, |ui| {
            ui.window("W", |ui| ui.text("pressed"));
        });
        assert_eq!(f.stats.created, 1);
        assert_eq!(f.stats.destroyed, 1);
    }

    #[test]
    fn test_removed_sibling_moves_later_widgets() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();

        ui.frame(&mut host, |ui| {
            ui.window("W", |ui| {
                ui.text("a");
                ui.button("b");
            });
        });
        let b = host.find(WidgetKind::Button, "b").unwrap();
        assert_eq!(host.object(b).unwrap().rect, Rect::new(5.0, 75.0, 100.0, 30.0));
        host.take_calls();

        let f = ui.frame(&mut host, |ui| {
            ui.window("W", |ui| {
                ui.button("b");
            });
        });
        assert_eq!(f.stats.rect_updates, 1);
        assert!(
            host.calls()
                .contains(&HostCall::SetRect(b, Rect::new(5.0, 40.0, 100.0, 30.0)))
        );
    }

    #[test]
    fn test_kind_change_under_same_key_replaces_control() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();

        ui.frame(&mut host, |ui| {
            ui.window("W", |ui| {
                ui.button("X");
            });
        });
        let button = host.find(WidgetKind::Button, "X").unwrap();
        let cid = control_id(&host, "X");
        host.take_calls();

        let f = ui.frame(&mut host, |ui| {
            ui.window("W", |ui| ui.text("X"));
        });
        assert_eq!(f.stats.destroyed, 1);
        assert_eq!(f.stats.created, 1);
        assert!(host.calls().contains(&HostCall::Destroy(button)));
        assert!(!host.is_live(button));
        assert!(host.find(WidgetKind::Button, "X").is_none());

        let text = host.find(WidgetKind::Text, "X").unwrap();
        let entry = ui.registry().find_by_handle(text).unwrap();
        assert_eq!(entry.kind, WidgetKind::Text);
        assert_eq!(entry.control_id, None);
        assert!(ui.registry().find_by_control_id(cid).is_none());
        assert_eq!(ui.registry().len(), 2);
    }

    #[test]
    fn test_window_rect_is_never_pushed() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();

        ui.frame(&mut host, |ui| {
            ui.window("A", |_| {});
            ui.window("B", |_| {});
        });
        let b = host.find(WidgetKind::Window, "B").unwrap();
        let created_at = Rect::new(5.0, 40.0, 100.0, 30.0);
        assert_eq!(ui.registry().find_by_handle(b).unwrap().cached_rect, created_at);
        host.take_calls();

        // "B" now takes the first slot.
        let f = ui.frame(&mut host, |ui| {
            ui.window("B", |_| {});
        });
        assert_eq!(ui.widgets()[0].rect, Rect::new(5.0, 5.0, 100.0, 30.0));
        assert_eq!(f.stats.destroyed, 1);
        assert_eq!(f.stats.rect_updates, 0);
        assert!(
            !host
                .calls()
                .iter()
                .any(|c| matches!(c, HostCall::SetRect(h, _) if *h == b))
        );
        assert_eq!(ui.registry().find_by_handle(b).unwrap().cached_rect, created_at);
        assert_eq!(host.object(b).unwrap().rect, created_at);
    }

    #[test]
    fn test_widget_outside_window_is_skipped() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();

        let f = ui.frame(&mut host, |ui| ui.text("loose"));
        assert_eq!(f.stats.skipped, 1);
        assert_eq!(host.create_count(), 0);
        assert!(ui.registry().is_empty());
    }

    #[test]
    fn test_host_failure_is_retried_next_frame() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();
        host.fail_creates(1);

        let f = window_frame(&mut ui, &mut host);
        // The window failed, so its child had no parent either.
        assert_eq!(f.stats.skipped, 2);
        assert!(ui.registry().is_empty());

        let f = window_frame(&mut ui, &mut host);
        assert_eq!(f.stats.created, 2);
        assert_eq!(ui.registry().len(), 2);
    }

    fn window_frame(ui: &mut Ui, host: &mut RecordingHost) -> Frame {
        ui.frame(host, |ui| {
            ui.window("W", |ui| {
                ui.button("Test");
            });
        })
    }

    #[test]
    fn test_events_posted_mid_frame_wait_for_next_frame() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();
        window_frame(&mut ui, &mut host);

        let cid = control_id(&host, "Test");
        let proxy = ui.event_proxy();
        let mut seen = Vec::new();
        for _ in 0..2 {
            ui.frame(&mut host, |ui| {
                ui.window("W", |ui| {
                    seen.push(ui.button("Test"));
                    if seen.len() == 1 {
                        proxy.post(NativeEvent::ControlActivated(cid));
                    }
                });
            });
        }
        assert_eq!(seen, vec![false, true]);
    }

    #[test]
    fn test_stale_events_are_ignored() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();
        window_frame(&mut ui, &mut host);
        let cid = control_id(&host, "Test");

        ui.frame(&mut host, |ui| {
            ui.window("W", |_| {});
        });
        host.activate(cid);
        let f = window_frame(&mut ui, &mut host);
        assert_eq!(f.events_applied, 0);
    }

    #[test]
    fn test_quit_request() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();
        let flag = ui.quit_flag();

        let f = ui.frame(&mut host, |ui| {
            if !ui.begin_window("W") {
                ui.request_quit();
                return;
            }
            if ui.button("Quit") {
                ui.request_quit();
            }
            ui.end_window();
        });
        assert!(!f.quit_requested);

        host.activate(control_id(&host, "Quit"));
        let f = ui.frame(&mut host, |ui| {
            ui.window("W", |ui| {
                if ui.button("Quit") {
                    ui.request_quit();
                }
            });
        });
        assert!(f.quit_requested);
        assert!(flag.is_set());
    }

    #[test]
    fn test_early_return_leaves_no_open_scope() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();

        ui.frame(&mut host, |ui| {
            ui.begin_window("W");
        });
        // Next frame's top-level window must not be parented to "W".
        ui.frame(&mut host, |ui| {
            ui.begin_window("W");
            ui.end_window();
            ui.window("Other", |_| {});
        });
        assert!(ui.widgets().iter().all(|w| w.parent.is_none()));
    }

    #[test]
    fn test_shutdown_destroys_everything() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();
        window_frame(&mut ui, &mut host);

        assert_eq!(ui.shutdown(&mut host), 2);
        assert_eq!(host.live_count(), 0);
        assert!(ui.registry().is_empty());
    }

    #[test]
    fn test_frame_index_counts_from_one() {
        let mut ui = Ui::new();
        let mut host = RecordingHost::new();
        let mut declared_as = 0;
        let f = ui.frame(&mut host, |ui| declared_as = ui.frame_index());
        assert_eq!(f.index, 1);
        assert_eq!(declared_as, 1);
        assert_eq!(ui.frame_index(), 1);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect {
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 50.0,
        };

        assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
    }
}
