use crate::palette::{GlooScheduler, cell_style};
use gloo::timers::callback::Interval;
use timestable_core as quiz;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Toggle(quiz::CellIndex),
    Rotate(u16),
}

#[derive(Properties, Clone, Debug, PartialEq)]
pub(crate) struct GridProps {
    #[prop_or_default]
    pub palette: quiz::PaletteConfig,
    #[prop_or_default]
    pub reveal_all: bool,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    index: quiz::CellIndex,
    cell: quiz::AnswerCell,
    hue: u16,
    callback: Callback<quiz::CellIndex>,
}

/// Grid the view starts from, optionally with every product visible.
fn initial_answers(props: &GridProps) -> quiz::AnswerGrid {
    if props.reveal_all {
        quiz::AnswerGrid::fully_revealed()
    } else {
        quiz::AnswerGrid::new()
    }
}

/// Value of the `data-correct` attribute the stylesheet keys on.
fn correct_attr(cell: &quiz::AnswerCell) -> &'static str {
    if cell.is_revealed() { "true" } else { "false" }
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        index,
        cell,
        hue,
        callback,
    } = props.clone();

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("cell {} clicked", index);
        callback.emit(index);
    });
    let label = cell.display().to_string();
    let content = match cell.display() {
        quiz::CellDisplay::Prompt(a, b) => html! {
            <>{a.to_string()}<span class="times">{"x"}</span>{b.to_string()}</>
        },
        quiz::CellDisplay::Product(_) => html! { {label.clone()} },
    };

    html! {
        <div
            class="cell"
            style={cell_style(hue)}
            data-correct={correct_attr(&cell)}
            aria-label={label}
            {onclick}
        >
            {content}
        </div>
    }
}

/// Host for the answer grid and its rotating palette.
pub(crate) struct GridView {
    answers: quiz::AnswerGrid,
    rotation: u16,
    palette: Option<quiz::RunningPalette<Interval>>,
}

impl GridView {
    fn start_palette(ctx: &Context<Self>) -> quiz::RunningPalette<Interval> {
        let link = ctx.link().clone();
        quiz::PaletteAnimator::start(ctx.props().palette, &GlooScheduler, move |rotation| {
            link.send_message(Msg::Rotate(rotation))
        })
    }
}

impl Component for GridView {
    type Message = Msg;
    type Properties = GridProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            answers: initial_answers(ctx.props()),
            rotation: 0,
            palette: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Toggle(index) => {
                // indices come from our own cells, a bad one is a bug
                self.answers = self.answers.toggle(index);
                log::debug!(
                    "cell {} toggled, {} of {} revealed",
                    index,
                    self.answers.revealed_count(),
                    self.answers.len()
                );
                true
            }
            Rotate(rotation) => {
                if self.rotation != rotation {
                    self.rotation = rotation;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let callback = ctx.link().callback(Msg::Toggle);

        html! {
            <div class="frame">
                <div class="grid">
                    {
                        for self.answers.iter().enumerate().map(|(index, cell)| {
                            let hue = quiz::hue_for(index, self.rotation);
                            let cell = cell.clone();
                            let callback = callback.clone();
                            html! {
                                <CellView key={index} {index} {cell} {hue} {callback}/>
                            }
                        })
                    }
                </div>
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.palette = Some(GridView::start_palette(ctx));
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(palette) = self.palette.take() {
            let last = palette.stop();
            log::debug!("grid destroyed, palette stopped at {}", last.rotation());
        }
    }
}
