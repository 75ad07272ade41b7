//! Snapshot to draw-list translation
//!
//! Pure and platform independent: every frame becomes a flat list of 2D
//! commands that a backend replays in order. Only the background strategy
//! changes per scene; the playfield layers are shared by game and sierra.

use glam::Vec2;

use crate::consts::*;
use crate::scene::{Scene, Snapshot};
use crate::sim::{Hsl, ObstacleKind, ParticleKind, Weather};

/// One 2D drawing operation in view coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Vertical gradient over the whole view
    Sky { top: String, bottom: String },
    Rect {
        pos: Vec2,
        size: Vec2,
        fill: String,
    },
    StrokeRect {
        pos: Vec2,
        size: Vec2,
        stroke: String,
        width: f32,
    },
    /// Closed filled polygon
    Poly { points: Vec<Vec2>, fill: String },
    /// Quadratic hump on `base` with its control point `height` above it
    Hump {
        x: f32,
        width: f32,
        height: f32,
        base: f32,
        fill: String,
    },
    /// Independent line segments sharing one stroke
    Lines {
        segments: Vec<(Vec2, Vec2)>,
        stroke: String,
        width: f32,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        fill: String,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        fill: String,
        align: TextAlign,
    },
    /// Global alpha for the following commands
    Alpha(f32),
    /// Save state, then translate to `origin` and rotate by `angle` radians
    Push { origin: Vec2, angle: f32 },
    /// Restore the state saved by the matching `Push`
    Pop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

const PLAYER_BODY: &str = "#ff6868";
const PLAYER_CANOPY: &str = "#ffe066";
const CORD: &str = "#dddddd";
const TRUNK: &str = "#5a3c1a";
const RAIN: &str = "#55aaff";
const LOGO: &str = "#7c4cff";
const LOGO_SHADOW: &str = "#3a2c60";
const BALLOON: &str = "#9b5de5";

fn rgba(r: u8, g: u8, b: u8, a: f32) -> String {
    format!("rgba({},{},{},{:.3})", r, g, b, a)
}

fn hsl(color: Hsl) -> String {
    color.css()
}

/// Build the complete draw list for one frame
pub fn build(snapshot: &Snapshot<'_>) -> Vec<DrawCmd> {
    let mut out = Vec::with_capacity(128);
    match snapshot.scene {
        Scene::Menu => {
            title_background(&mut out, snapshot.menu_frame);
            menu(&mut out, snapshot);
            confetti(&mut out, snapshot);
            if snapshot.help_visible {
                help_overlay(&mut out);
            }
        }
        Scene::Birthday => {
            title_background(&mut out, snapshot.menu_frame);
            centered(&mut out, "HAPPY BIRTHDAY!", 150.0, 26.0, LOGO);
            confetti(&mut out, snapshot);
        }
        Scene::Game => {
            meadow_background(&mut out, snapshot);
            playfield(&mut out, snapshot);
        }
        Scene::Sierra => {
            sierra_background(&mut out, snapshot);
            playfield(&mut out, snapshot);
        }
    }
    out
}

fn centered(out: &mut Vec<DrawCmd>, text: &str, y: f32, size: f32, fill: &str) {
    out.push(DrawCmd::Text {
        text: text.to_string(),
        pos: Vec2::new(VIEW_WIDTH / 2.0, y),
        size,
        fill: fill.to_string(),
        align: TextAlign::Center,
    });
}

fn text(out: &mut Vec<DrawCmd>, text: String, pos: Vec2, size: f32, fill: &str) {
    out.push(DrawCmd::Text {
        text,
        pos,
        size,
        fill: fill.to_string(),
        align: TextAlign::Left,
    });
}

fn full_view(fill: String) -> DrawCmd {
    DrawCmd::Rect {
        pos: Vec2::ZERO,
        size: Vec2::new(VIEW_WIDTH, VIEW_HEIGHT),
        fill,
    }
}

// === Backgrounds ===

fn title_background(out: &mut Vec<DrawCmd>, frame: u64) {
    out.push(DrawCmd::Sky {
        top: "#8fd3ff".into(),
        bottom: "#ffffff".into(),
    });
    let t = frame as f32;
    for i in 0..5 {
        let fi = i as f32;
        let x = (t * 0.2 + fi * 90.0) % 600.0 - 120.0;
        let y = 40.0 + fi * 30.0 + (t / 50.0 + fi).sin() * 10.0;
        // Gentle shimmer instead of per-frame noise
        let alpha = 0.4 + 0.4 * (t / 40.0 + fi * 1.7).sin().abs();
        let fill = rgba(255, 255, 255, alpha);
        out.push(DrawCmd::Rect {
            pos: Vec2::new(x, y),
            size: Vec2::new(40.0, 10.0),
            fill: fill.clone(),
        });
        out.push(DrawCmd::Rect {
            pos: Vec2::new(x + 10.0, y - 5.0),
            size: Vec2::new(20.0, 10.0),
            fill,
        });
    }
}

fn sky_colors(weather: Weather) -> (&'static str, &'static str) {
    match weather {
        Weather::Night => ("#001030", "#002050"),
        Weather::Storm => ("#4a5d75", "#9da7bb"),
        _ => ("#8fd3ff", "#ffffff"),
    }
}

/// Day-night rhythm tint strength
pub fn night_tint(frame: u64) -> f32 {
    0.3 * (frame as f32 / 1500.0).sin().abs()
}

fn meadow_background(out: &mut Vec<DrawCmd>, snap: &Snapshot<'_>) {
    let (top, bottom) = sky_colors(snap.weather);
    out.push(DrawCmd::Sky {
        top: top.into(),
        bottom: bottom.into(),
    });
    out.push(full_view(rgba(0, 0, 40, night_tint(snap.frame))));

    let night = snap.weather == Weather::Night;
    out.push(DrawCmd::Alpha(if night { 0.6 } else { 1.0 }));
    for cloud in snap.clouds {
        let fill = hsl(cloud.shade);
        out.push(DrawCmd::Rect {
            pos: cloud.pos,
            size: Vec2::new(40.0, 12.0),
            fill: fill.clone(),
        });
        out.push(DrawCmd::Rect {
            pos: cloud.pos + Vec2::new(10.0, -6.0),
            size: Vec2::new(24.0, 12.0),
            fill,
        });
    }
    out.push(DrawCmd::Alpha(1.0));

    for hill in snap.hills {
        out.push(DrawCmd::Hump {
            x: hill.x,
            width: HILL_WIDTH,
            height: hill.height,
            base: VIEW_HEIGHT,
            fill: hsl(hill.color),
        });
    }
}

fn sierra_background(out: &mut Vec<DrawCmd>, snap: &Snapshot<'_>) {
    out.push(DrawCmd::Sky {
        top: "#87a0d0".into(),
        bottom: "#d8bfa8".into(),
    });

    if let Some(scenery) = snap.sierra {
        for m in &scenery.mountains {
            out.push(DrawCmd::Poly {
                points: vec![
                    Vec2::new(m.x, VIEW_HEIGHT),
                    Vec2::new(m.x + m.width / 2.0, VIEW_HEIGHT - m.height),
                    Vec2::new(m.x + m.width, VIEW_HEIGHT),
                ],
                fill: hsl(m.color),
            });
        }
    }

    let valley = Hsl::new(110.0, 30.0, 25.0).css();
    for hill in snap.hills {
        out.push(DrawCmd::Hump {
            x: hill.x,
            width: HILL_WIDTH,
            height: hill.height * 0.6,
            base: VIEW_HEIGHT,
            fill: valley.clone(),
        });
    }

    if let Some(scenery) = snap.sierra {
        let segments = scenery
            .birds
            .iter()
            .flat_map(|b| {
                let wing = b.pos + Vec2::new(6.0, 2.0);
                [(b.pos, wing), (wing, b.pos + Vec2::new(12.0, 0.0))]
            })
            .collect();
        out.push(DrawCmd::Lines {
            segments,
            stroke: "#222".into(),
            width: 1.0,
        });
    }
}

// === Playfield ===

fn playfield(out: &mut Vec<DrawCmd>, snap: &Snapshot<'_>) {
    obstacles(out, snap);
    particles(out, snap);
    power_ups(out, snap);
    player(out, snap);
    hud(out, snap);
}

fn obstacles(out: &mut Vec<DrawCmd>, snap: &Snapshot<'_>) {
    for o in snap.obstacles {
        let fill = hsl(o.color);
        match o.kind {
            ObstacleKind::Tree => {
                let bottom = o.pos.y + o.size.y;
                out.push(DrawCmd::Poly {
                    points: vec![
                        Vec2::new(o.pos.x, bottom),
                        Vec2::new(o.pos.x + o.size.x / 2.0, o.pos.y),
                        Vec2::new(o.pos.x + o.size.x, bottom),
                    ],
                    fill,
                });
                out.push(DrawCmd::Rect {
                    pos: Vec2::new(o.pos.x + o.size.x / 2.0 - 2.0, bottom),
                    size: Vec2::new(4.0, 10.0),
                    fill: TRUNK.into(),
                });
            }
            ObstacleKind::Building => {
                out.push(DrawCmd::Rect {
                    pos: o.pos,
                    size: o.size,
                    fill,
                });
                let mut row = 0.0;
                while row < o.size.y {
                    out.push(DrawCmd::Rect {
                        pos: o.pos + Vec2::new(3.0, row + 3.0),
                        size: Vec2::new(o.size.x - 6.0, 2.0),
                        fill: rgba(255, 255, 255, 0.1),
                    });
                    row += 10.0;
                }
            }
        }
    }
}

fn particles(out: &mut Vec<DrawCmd>, snap: &Snapshot<'_>) {
    if snap.weather.is_raining() {
        let segments = snap
            .particles
            .iter()
            .filter(|p| p.kind == ParticleKind::Rain)
            .map(|p| (p.pos, p.pos + Vec2::new(2.0, 6.0)))
            .collect();
        out.push(DrawCmd::Lines {
            segments,
            stroke: RAIN.into(),
            width: 1.0,
        });
    } else if snap.weather == Weather::Snow {
        for p in snap.particles {
            if matches!(p.kind, ParticleKind::Snow { .. }) {
                out.push(DrawCmd::Rect {
                    pos: p.pos,
                    size: Vec2::splat(2.0),
                    fill: "#fff".into(),
                });
            }
        }
    }

    if snap.lightning_alpha > 0.0 {
        out.push(full_view(rgba(255, 255, 255, snap.lightning_alpha)));
    }
}

fn power_ups(out: &mut Vec<DrawCmd>, snap: &Snapshot<'_>) {
    for p in snap.power_ups {
        out.push(DrawCmd::Rect {
            pos: p.pos,
            size: p.size,
            fill: p.kind.color().into(),
        });
        out.push(DrawCmd::StrokeRect {
            pos: p.pos - Vec2::ONE,
            size: p.size + Vec2::splat(2.0),
            stroke: "#fff".into(),
            width: 1.0,
        });
    }
}

/// Parachutist, rotated about its centre by half the tilt
fn player(out: &mut Vec<DrawCmd>, snap: &Snapshot<'_>) {
    let p = snap.player;
    let (w, h) = (p.size.x, p.size.y);
    out.push(DrawCmd::Push {
        origin: p.pos + p.size / 2.0,
        angle: p.tilt * 0.5,
    });
    let corner = -p.size / 2.0;
    let at = |x: f32, y: f32| corner + Vec2::new(x, y);

    out.push(DrawCmd::Poly {
        points: vec![
            at(-3.0, -10.0),
            at(w / 4.0, -12.5),
            at(w / 2.0, -13.0),
            at(w * 0.75, -12.5),
            at(w + 3.0, -10.0),
            at(w + 3.0, -6.0),
            at(-3.0, -6.0),
        ],
        fill: PLAYER_CANOPY.into(),
    });
    out.push(DrawCmd::Lines {
        segments: vec![(at(0.0, 0.0), at(0.0, -6.0)), (at(w, 0.0), at(w, -6.0))],
        stroke: CORD.into(),
        width: 1.0,
    });
    out.push(DrawCmd::Rect {
        pos: corner,
        size: p.size,
        fill: PLAYER_BODY.into(),
    });
    if let Some(kind) = p.power {
        out.push(DrawCmd::StrokeRect {
            pos: at(-1.0, -1.0),
            size: Vec2::new(w + 2.0, h + 2.0),
            stroke: kind.color().into(),
            width: 2.0,
        });
    }
    out.push(DrawCmd::Pop);
}

fn hud(out: &mut Vec<DrawCmd>, snap: &Snapshot<'_>) {
    let ink = if snap.weather == Weather::Night {
        "#fff"
    } else {
        "#000"
    };
    text(out, format!("Score: {}", snap.score), Vec2::new(10.0, 20.0), 16.0, ink);
    text(
        out,
        format!("Weather: {}", snap.weather.name()),
        Vec2::new(10.0, 40.0),
        16.0,
        ink,
    );
    if let Some(kind) = snap.player.power {
        text(
            out,
            format!("Power: {}", kind.name()),
            Vec2::new(10.0, 60.0),
            16.0,
            ink,
        );
    }
    if snap.game_over {
        text(out, "GAME OVER".into(), Vec2::new(180.0, 150.0), 16.0, "#ff0000");
        text(
            out,
            "Press SPACE to restart".into(),
            Vec2::new(130.0, 170.0),
            16.0,
            ink,
        );
    }
}

// === Menu ===

fn menu(out: &mut Vec<DrawCmd>, snap: &Snapshot<'_>) {
    centered(out, "PARACHUTE PILOT", 130.0, 26.0, LOGO_SHADOW);
    centered(out, "PARACHUTE PILOT", 128.0, 26.0, LOGO);

    // Swinging parachute icon
    let swing = (snap.menu_frame as f32 / 30.0).sin() * 3.0;
    out.push(DrawCmd::Push {
        origin: Vec2::new(VIEW_WIDTH / 2.0, 90.0),
        angle: swing.to_radians(),
    });
    out.push(DrawCmd::Rect {
        pos: Vec2::new(-6.0, 0.0),
        size: Vec2::new(12.0, 14.0),
        fill: PLAYER_BODY.into(),
    });
    out.push(DrawCmd::Hump {
        x: -12.0,
        width: 24.0,
        height: 8.0,
        base: -6.0,
        fill: PLAYER_CANOPY.into(),
    });
    out.push(DrawCmd::Pop);

    if (snap.menu_frame / 30) % 2 == 0 {
        centered(out, "PRESS  SPACE  TO  START", 210.0, 16.0, "#000");
    }
    centered(out, "[H] HELP   [S] SIERRA   [M] MUSIC", 240.0, 14.0, "#000");
    let music = if snap.music_enabled { "ON" } else { "OFF" };
    text(out, format!("♫ {}", music), Vec2::new(420.0, 20.0), 14.0, "#000");

    let balloon = snap.balloon;
    if balloon.active {
        out.push(DrawCmd::Ellipse {
            center: balloon.pos,
            radii: Vec2::new(6.0, 8.0),
            fill: BALLOON.into(),
        });
        out.push(DrawCmd::Lines {
            segments: vec![(
                balloon.pos + Vec2::new(0.0, 8.0),
                balloon.pos + Vec2::new(0.0, 14.0),
            )],
            stroke: "#000".into(),
            width: 1.0,
        });
    }
}

fn confetti(out: &mut Vec<DrawCmd>, snap: &Snapshot<'_>) {
    for piece in snap.confetti {
        out.push(DrawCmd::Rect {
            pos: piece.pos,
            size: Vec2::splat(2.0),
            fill: hsl(piece.color),
        });
    }
}

fn help_overlay(out: &mut Vec<DrawCmd>) {
    out.push(DrawCmd::Rect {
        pos: Vec2::new(60.0, 40.0),
        size: Vec2::new(360.0, 240.0),
        fill: rgba(255, 255, 255, 0.9),
    });
    centered(out, "HOW TO FLY", 80.0, 18.0, "#000");
    let lines = [
        "Feather Drift    - Slow fall",
        "Weather Shield   - Obstacle immunity",
        "Wind Stabilizer  - Calm winds",
        "Purple Balloon   - Surprise!",
    ];
    for (i, line) in lines.iter().enumerate() {
        text(
            out,
            (*line).to_string(),
            Vec2::new(90.0, 120.0 + 20.0 * i as f32),
            14.0,
            "#000",
        );
    }
    text(
        out,
        "Press [H] again to close".into(),
        Vec2::new(150.0, 240.0),
        14.0,
        "#000",
    );
}
