//! Integration tests for TOML and environment configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use ct_config::{ConcreteConfig, Orientation};
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/concretrack/lab.db"
page_size = 50

[company]
name = "Laboratorio Central"
address = "Cra 7 #12-40"
phone = "3000000000"

[report]
renderer_binary = "/usr/local/bin/wkhtmltopdf"
location_label = "Sampling site"

[page]
orientation = "portrait"
margin_left_mm = 20
"#,
        )?;

        let config: ConcreteConfig =
            Figment::from(Serialized::defaults(ConcreteConfig::default()))
                .merge(Toml::file("config.toml"))
                .extract()?;

        assert_eq!(config.database.path, "/var/lib/concretrack/lab.db");
        assert_eq!(config.database.page_size, 50);
        assert_eq!(config.database.busy_timeout_ms, 5000);
        assert_eq!(config.company.name, "Laboratorio Central");
        assert_eq!(config.company.phone, "3000000000");
        assert_eq!(config.report.renderer_binary, "/usr/local/bin/wkhtmltopdf");
        assert_eq!(config.report.location_label, "Sampling site");
        assert_eq!(config.page.orientation, Orientation::Portrait);
        assert_eq!(config.page.margin_left_mm, 20);
        assert_eq!(config.page.margin_right_mm, 10);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".concretrack")?;
        jail.create_file(
            ".concretrack/config.toml",
            r#"
[company]
name = "Obra Local"
"#,
        )?;

        let config = ConcreteConfig::load().expect("config loads");
        assert_eq!(config.company.name, "Obra Local");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".concretrack")?;
        jail.create_file(
            ".concretrack/config.toml",
            r#"
[database]
page_size = 10
"#,
        )?;
        jail.set_env("CONCRETRACK_DATABASE__PAGE_SIZE", "5");
        jail.set_env("CONCRETRACK_COMPANY__PHONE", "3051234567");

        let config = ConcreteConfig::load().expect("config loads");
        assert_eq!(config.database.page_size, 5);
        assert_eq!(config.company.phone, "3051234567");
        Ok(())
    });
}

#[test]
fn load_rejects_zero_page_size() {
    Jail::expect_with(|jail| {
        jail.set_env("CONCRETRACK_DATABASE__PAGE_SIZE", "0");
        let result = ConcreteConfig::load();
        assert!(result.is_err());
        Ok(())
    });
}
