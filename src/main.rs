use yew_tabletop::components::App;
use yew_tabletop::util::init_logging;

fn main() {
    console_error_panic_hook::set_once();
    init_logging(log::LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
