use nodebind::core::settings::SettingsHub;
use nodebind::settings;

#[settings(namespace = "Ui.Test")]
#[derive(Clone, Debug, Default)]
pub struct Workspace {
    #[setting(default = 12, range(min = 4.0, max = 64.0))]
    pub grid_size: i64,

    #[setting(default = "metric")]
    pub unit_system: String,
}

fn main() {
    let mut hub = SettingsHub::in_memory();

    assert_eq!(Workspace::grid_size(&hub), 12);
    Workspace::set_grid_size(&mut hub, 128);
    assert_eq!(Workspace::grid_size(&hub), 128);
    assert_eq!(Workspace::GRID_SIZE_KEY, "Ui.Test.Workspace.grid_size");
}
