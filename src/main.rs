//! Twin Rubik's cube visualization with iced UI.
//!
//! Two 3x3x3 cubes rendered side by side in independent orthographic views,
//! modeling a physically joined pair that shares one column of stickers.
//! Each cube has its own pad of move keys; left click applies the move,
//! right click its inverse. Uses iced for UI and wgpu for GPU rendering.

use std::time::Instant;

use iced::widget::{Column, Row, Shader, Space, container, mouse_area, text};
use iced::{Element, Length, Settings, Subscription, Task};

mod camera;
mod cube;
mod location;
mod math;
mod moves;
mod pair;
mod renderer;
mod shader_widget;
mod sync;
mod turn;

use pair::{CubeId, CubePair, MoveButton};
use shader_widget::CubePairProgram;

/// Main application state: the engine owner plus nothing else.
#[derive(Debug)]
pub(crate) struct CubePairApp {
    pair: CubePair,
}

/// Messages that the application can receive
#[derive(Debug, Clone)]
pub(crate) enum Message {
    Tick(Instant),
    UserMove {
        cube: CubeId,
        letter: char,
        button: MoveButton,
    },
}

impl CubePairApp {
    pub(crate) fn new() -> Self {
        Self {
            pair: CubePair::new(),
        }
    }

    pub(crate) fn title(&self) -> &'static str {
        "Twin Cubes"
    }

    pub(crate) fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick(now) => {
                self.pair.tick(now);
            }
            Message::UserMove {
                cube,
                letter,
                button,
            } => {
                self.pair.on_user_move(cube, letter, button, Instant::now());
            }
        }

        Task::none()
    }

    pub(crate) fn subscription(&self) -> Subscription<Message> {
        iced::window::frames().map(Message::Tick)
    }

    pub(crate) fn view(&self) -> Element<'_, Message> {
        let viewport = Shader::new(CubePairProgram::new(&self.pair))
            .width(Length::Fill)
            .height(Length::Fill);

        // One pad of move keys per cube, mirroring the on-screen cube order.
        let controls = Row::new()
            .spacing(60)
            .push(move_pad(CubeId::Primary))
            .push(move_pad(CubeId::Secondary));

        Column::new()
            .spacing(10)
            .padding(10)
            .push(viewport)
            .push(container(controls).center_x(Length::Fill))
            .into()
    }
}

const KEY_SIZE: f32 = 36.0;

fn move_pad(cube: CubeId) -> Element<'static, Message> {
    let rows: [&[Option<char>]; 5] = [
        &[None, Some('U'), None],
        &[Some('L'), Some('F'), Some('R')],
        &[None, Some('D'), Some('B')],
        &[Some('M'), Some('E'), Some('S')],
        &[Some('x'), Some('y'), Some('z')],
    ];

    let mut pad = Column::new().spacing(4);
    for row in rows {
        let mut keys = Row::new().spacing(4);
        for slot in row {
            keys = keys.push(match slot {
                Some(letter) => move_key(cube, *letter),
                None => Space::new(KEY_SIZE, KEY_SIZE).into(),
            });
        }
        pad = pad.push(keys);
    }
    pad.into()
}

fn move_key(cube: CubeId, letter: char) -> Element<'static, Message> {
    let key = container(text(letter.to_string()))
        .style(container::rounded_box)
        .center_x(KEY_SIZE)
        .center_y(KEY_SIZE);
    mouse_area(key)
        .on_press(Message::UserMove {
            cube,
            letter,
            button: MoveButton::Primary,
        })
        .on_right_press(Message::UserMove {
            cube,
            letter,
            button: MoveButton::Secondary,
        })
        .into()
}

/// Entry point for the twin-cube visualization application
fn main() -> iced::Result {
    env_logger::builder().format_timestamp(None).init();

    let app = CubePairApp::new();
    iced::application(app.title(), CubePairApp::update, CubePairApp::view)
        .subscription(CubePairApp::subscription)
        .settings(Settings {
            antialiasing: true,
            ..Settings::default()
        })
        .run_with(move || (app, Task::none()))
}
