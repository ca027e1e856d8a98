//! Main app state

use crate::{fl, key_binds, message::Message, watcher};
use cosmic::{
    Action, Application, ApplicationExt, Core, Element, Task,
    iced::{ContentFit, Length, window},
    task::future,
    widget::{button, column, container, image::Handle, text},
};
use rfd::AsyncFileDialog;
use shared::ImageBuffer;
use std::path::PathBuf;
use viewer_config::ViewerConfig;
use viewer_nav::{EXTENSIONS, get_image_dir};
use viewer_session::Session;
use viewer_types::{Effect, ViewerEvent};

pub struct WatchPgm {
    core: Core,
    config: ViewerConfig,
    session: Session,
    handle: Option<Handle>,
    error_dialog: Option<String>,
}

impl WatchPgm {
    pub const APP_ID: &'static str = viewer_config::APP_ID;

    fn dispatch(&mut self, event: ViewerEvent) -> Task<Action<Message>> {
        let effects = self.session.handle(event);
        let tasks: Vec<_> = effects
            .into_iter()
            .map(|effect| self.apply(effect))
            .collect();

        Task::batch(tasks)
    }

    fn apply(&mut self, effect: Effect) -> Task<Action<Message>> {
        match effect {
            Effect::Redraw => {
                self.handle = self.session.image().map(image_handle);
                Task::none()
            }
            Effect::SetTitle(path) => self.update_title(Some(path)),
            Effect::ShowError(msg) => {
                self.error_dialog = Some(msg);
                Task::none()
            }
            Effect::Quit => std::process::exit(0),
        }
    }

    fn update_title(&mut self, path: Option<PathBuf>) -> Task<Action<Message>> {
        let title = match path {
            Some(path) => format!("{} - {}", path.display(), fl!("app-title")),
            None => fl!("app-title"),
        };

        match self.core.main_window_id() {
            Some(id) => self.set_window_title(title, id),
            None => Task::none(),
        }
    }
}

fn image_handle(image: &ImageBuffer) -> Handle {
    let rgba = image.to_rgba_image();
    Handle::from_rgba(image.width(), image.height(), rgba.into_raw())
}

impl Application for WatchPgm {
    type Executor = cosmic::executor::Default;
    type Flags = ViewerConfig;
    type Message = Message;

    const APP_ID: &'static str = Self::APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, Task<Action<Self::Message>>) {
        let mut app = Self {
            core,
            config: flags,
            session: Session::default(),
            handle: None,
            error_dialog: None,
        };

        let title = app.update_title(None);

        (app, title)
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let spacing = cosmic::theme::active().cosmic().spacing;

        let content: Element<'_, Message> = match &self.handle {
            Some(handle) => container(
                cosmic::widget::image(handle.clone())
                    .content_fit(ContentFit::ScaleDown)
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .center(Length::Fill)
            .into(),
            None => container(
                column()
                    .push(text::title4(fl!("drop-hint")))
                    .push(text::caption(fl!("drop-hint-keys")))
                    .spacing(spacing.space_s)
                    .align_x(cosmic::iced::Alignment::Center),
            )
            .center(Length::Fill)
            .into(),
        };

        if let Some(msg) = &self.error_dialog {
            let backdrop = cosmic::widget::mouse_area(
                container(cosmic::widget::Space::new(Length::Fill, Length::Fill))
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .class(cosmic::theme::Container::Transparent),
            )
            .on_press(Message::CloseErrorDialog);

            cosmic::iced_widget::stack![content, backdrop, self.error_dialog_view(msg)].into()
        } else {
            content
        }
    }

    fn update(&mut self, message: Message) -> Task<Action<Self::Message>> {
        match message {
            Message::Tick => self.dispatch(ViewerEvent::Tick),
            Message::FileDropped(path) => {
                self.session.queue_drop(path);
                Task::none()
            }
            Message::FilesSelected(paths) => self.dispatch(ViewerEvent::Drop(paths)),
            Message::OpenFileDialog => {
                let start_dir = self
                    .session
                    .target()
                    .and_then(get_image_dir)
                    .or_else(dirs::picture_dir);

                future(async move {
                    let mut dialog = AsyncFileDialog::new()
                        .set_title(fl!("open-title"))
                        .add_filter(fl!("open-filter"), EXTENSIONS);
                    if let Some(dir) = start_dir {
                        dialog = dialog.set_directory(dir);
                    }

                    match dialog.pick_files().await {
                        Some(handles) => Message::FilesSelected(
                            handles
                                .iter()
                                .map(|handle| handle.path().to_path_buf())
                                .collect(),
                        ),
                        None => Message::Cancelled,
                    }
                })
            }
            Message::Next => self.dispatch(ViewerEvent::Next),
            Message::Prev => self.dispatch(ViewerEvent::Prev),
            Message::KeyBind(action) => self.update(action.message()),
            Message::CloseErrorDialog => {
                self.error_dialog = None;
                Task::none()
            }
            Message::Cancelled => Task::none(),
            Message::Quit => self.dispatch(ViewerEvent::Quit),
        }
    }

    fn subscription(&self) -> cosmic::iced::Subscription<Self::Message> {
        cosmic::iced::Subscription::batch([
            cosmic::iced::keyboard::on_key_press(key_binds::key_press_handler),
            cosmic::iced::window::events().map(|(_, event)| {
                if let window::Event::FileDropped(path) = event {
                    Message::FileDropped(path)
                } else {
                    Message::Cancelled
                }
            }),
            watcher::poll_ticks(self.config.poll_interval()),
        ])
    }
}

impl WatchPgm {
    fn error_dialog_view(&self, msg: &str) -> Element<'_, Message> {
        use cosmic::widget::Space;

        let spacing = cosmic::theme::active().cosmic().spacing;

        let content = column()
            .push(text::title4(fl!("load-error-title")))
            .push(Space::with_height(Length::Fixed(spacing.space_xs as f32)))
            .push(text::body(msg.to_string()))
            .push(Space::with_height(Length::Fixed(spacing.space_m as f32)))
            .push(button::standard(fl!("ok")).on_press(Message::CloseErrorDialog))
            .spacing(spacing.space_xxs)
            .align_x(cosmic::iced::Alignment::Center);

        let dialog_container = container(content)
            .padding(spacing.space_m)
            .class(cosmic::theme::Container::Dialog);

        container(
            container(dialog_container)
                .width(Length::Shrink)
                .height(Length::Shrink),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(cosmic::iced::alignment::Horizontal::Center)
        .align_y(cosmic::iced::alignment::Vertical::Center)
        .into()
    }
}
