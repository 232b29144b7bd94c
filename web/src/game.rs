use crate::timers::GlooScheduler;
use crate::utils::*;
use clap::Args;
use pairs_core as game;
use yew::prelude::*;

type Controller = game::GameController<GlooScheduler, Vec<game::Notification>>;

/// What the page shows, rebuilt only from controller notifications.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct RenderState {
    cards: Vec<game::CardView>,
    score: game::Points,
    seconds_left: game::Seconds,
    status: String,
    game_over: bool,
}

impl RenderState {
    fn new(config: &game::GameConfig) -> Self {
        Self {
            seconds_left: config.countdown_secs,
            ..Default::default()
        }
    }

    fn apply(&mut self, notification: game::Notification) {
        use game::Notification::*;

        match notification {
            BoardRendered(cards) => {
                // an empty board only ever follows a reset
                if cards.is_empty() {
                    self.game_over = false;
                }
                self.cards = cards;
            }
            ScoreChanged(score) => self.score = score,
            TimeChanged(seconds) => self.seconds_left = seconds,
            StatusChanged(status) => self.status = status,
            GameOver => self.game_over = true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Start,
    Select(game::CardId),
    TryAgain,
    Timer(game::TimerToken),
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    view: game::CardView,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CardId>,
}

#[function_component(CardCell)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        view,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!("card");
    if view.revealed {
        class.push("flipped");
    }
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked (locked: {})", view.id, locked);
        if !locked {
            callback.emit(view.id);
        }
    });

    html! {
        <td {class} {onclick}>{view.face.map(String::from).unwrap_or_default()}</td>
    }
}

#[derive(Args, Properties, Debug, Clone, Default, PartialEq)]
pub(crate) struct GameProps {
    /// Force a shuffle seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    pub seed: Option<u64>,
}

pub(crate) struct GameView {
    game: Controller,
    render: RenderState,
}

impl GameView {
    fn drain_notifications(&mut self) -> bool {
        let Self { game, render } = self;
        let score = game.score();
        let mut updated = false;
        for notification in game.observer_mut().drain(..) {
            log::trace!("notification: {:?}", notification);
            if notification.is_game_over() {
                log::info!("game over, score {}", score);
            }
            render.apply(notification);
            updated = true;
        }
        updated
    }

    fn start(&mut self) {
        if let Err(err) = self.game.start() {
            log::error!("could not start game: {}", err);
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let config = game::GameConfig::DEFAULT;
        let scheduler = GlooScheduler::new(ctx.link().clone());
        Self {
            game: game::GameController::new(config, scheduler, Vec::new(), seed),
            render: RenderState::new(&config),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Start => {
                log::debug!("start requested");
                self.start();
            }
            Select(id) => {
                let outcome = self.game.select_card(id);
                log::debug!("select card {}: {:?}", id, outcome);
            }
            TryAgain => {
                log::debug!("try again requested");
                self.game.reset();
                self.start();
            }
            Timer(token) => {
                self.game.on_timer(token);
            }
        }

        self.drain_notifications()
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let RenderState {
            cards,
            score,
            seconds_left,
            status,
            game_over,
        } = &self.render;
        let not_started = matches!(self.game.phase(), game::GamePhase::NotStarted);
        let columns = grid_columns(cards.len());

        let cb_start = ctx.link().callback(|_: MouseEvent| Start);
        let cb_try_again = ctx.link().callback(|_: MouseEvent| TryAgain);

        html! {
            <div class="pairs">
                <nav>
                    <aside id="score">{format!("Score: {}", score)}</aside>
                    <span id="status">{status.clone()}</span>
                    <aside id="timer">{format!("Time: {}", format_clock(*seconds_left))}</aside>
                </nav>
                if not_started {
                    <button id="start-game" onclick={cb_start}>{"Start Game"}</button>
                }
                <table id="game-board" class={self.game.phase().is_playing().then_some("playable")}>
                    {
                        for cards.chunks(columns).map(|row| html! {
                            <tr>
                                {
                                    for row.iter().map(|&view| {
                                        let locked = !self.game.can_select(view.id);
                                        let callback = ctx.link().callback(Msg::Select);
                                        html! {
                                            <CardCell key={view.id} {view} {locked} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                if *game_over {
                    <div id="game-over">
                        <p>{"Game Over"}</p>
                        <button id="try-again" onclick={cb_try_again}>{"Try Again"}</button>
                    </div>
                }
            </div>
        }
    }
}
