use bevy::prelude::*;

use crate::config::BANNER_STEP_SECS;
use crate::host::{BannerScroll, HostContext};
use crate::systems::clock::UtcClock;
use crate::systems::iss::LatestFix;

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HostContext>()
           .insert_resource(BannerTimer(Timer::from_seconds(BANNER_STEP_SECS, TimerMode::Repeating)))
           .add_systems(Startup, setup_ui)
           .add_systems(Update, (scroll_banner, update_position, update_datetime));
    }
}

const CYAN: Color = Color::srgb(0.0, 1.0, 1.0);

// UI component for the scrolling welcome text
#[derive(Component)]
pub struct WelcomeBanner(pub BannerScroll);

// UI component to display the last ISS fix
#[derive(Component)]
pub struct PositionDisplay;

// UI component to display current datetime
#[derive(Component)]
pub struct DateTimeDisplay;

#[derive(Resource)]
struct BannerTimer(Timer);

fn setup_ui(mut commands: Commands, host: Res<HostContext>, window: Query<&Window>) {
    let width = window.single().map(|w| w.width()).unwrap_or(1280.0);

    // readout, top left
    commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            BackgroundColor(Color::NONE),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("ISS: Acquiring..."),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(CYAN),
                PositionDisplay,
            ));

            parent.spawn((
                Text::new("Time: Loading..."),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(CYAN),
                DateTimeDisplay,
                Node {
                    margin: UiRect::top(Val::Px(5.0)), // spacing
                    ..default()
                },
            ));
        });

    // welcome banner, bottom edge
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Px(32.0),
                border: UiRect::vertical(Val::Px(2.0)),
                overflow: Overflow::clip(),
                ..default()
            },
            BorderColor(CYAN),
            BackgroundColor(Color::BLACK),
        ))
        .with_children(|parent| {
            let scroll = BannerScroll::new(width);
            parent.spawn((
                Text::new(host.banner_text()),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(CYAN),
                TextLayout::new_with_no_wrap(),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(scroll.offset),
                    ..default()
                },
                WelcomeBanner(scroll),
            ));
        });
}

fn scroll_banner(
    time: Res<Time>,
    mut timer: ResMut<BannerTimer>,
    window: Query<&Window>,
    mut banner_query: Query<(&mut WelcomeBanner, &mut Node)>,
) {
    timer.0.tick(time.delta());
    let steps = timer.0.times_finished_this_tick();
    if steps == 0 {
        return;
    }

    let width = window.single().map(|w| w.width()).unwrap_or(1280.0);

    for (mut banner, mut node) in banner_query.iter_mut() {
        for _ in 0..steps {
            banner.0.step(width);
        }
        node.left = Val::Px(banner.0.offset);
    }
}

// update the ISS readout from the last applied fix
fn update_position(
    latest: Res<LatestFix>,
    mut text_query: Query<&mut Text, With<PositionDisplay>>,
) {
    if !latest.is_changed() {
        return;
    }
    let Some(fix) = latest.0.as_ref() else { return; };

    if let Ok(mut text) = text_query.single_mut() {
        let position = fix.report.position;
        text.0 = match fix.report.timestamp {
            Some(at) => format!(
                "ISS: {:.4}°, {:.4}° (as of {})",
                position.latitude,
                position.longitude,
                at.format("%H:%M:%S")
            ),
            None => format!("ISS: {:.4}°, {:.4}°", position.latitude, position.longitude),
        };
    }
}

// update the datetime display with current UTC time
fn update_datetime(
    clock: Res<UtcClock>,
    mut text_query: Query<&mut Text, With<DateTimeDisplay>>,
) {
    if let Ok(mut text) = text_query.single_mut() {
        text.0 = format!("Time: {} UTC", clock.now.format("%Y-%m-%d %H:%M:%S"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::coords::{GeoPosition, geo_to_cartesian};
    use crate::feed::IssReport;
    use crate::poller::PositionFix;

    #[test]
    fn test_readouts() {
        let mut app = App::new();
        let position = GeoPosition::new(-12.5, 130.25);
        app.insert_resource(UtcClock::fixed(
            Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
        ))
        .insert_resource(LatestFix(Some(PositionFix {
            seq: 4,
            report: IssReport {
                position,
                timestamp: None,
                message: None,
            },
            point: geo_to_cartesian(position, 2.0),
        })))
        .add_systems(Update, (update_position, update_datetime));

        let pos_text = app.world_mut().spawn((Text::new(""), PositionDisplay)).id();
        let time_text = app.world_mut().spawn((Text::new(""), DateTimeDisplay)).id();

        app.update();

        assert_eq!(
            app.world().get::<Text>(pos_text).unwrap().0,
            "ISS: -12.5000°, 130.2500°"
        );
        assert_eq!(
            app.world().get::<Text>(time_text).unwrap().0,
            "Time: 2025-01-02 03:04:05 UTC"
        );
    }
}
