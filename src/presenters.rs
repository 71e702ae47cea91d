use prettytable::{format, Cell, Row, Table};
use serde::Serialize;
use std::io::Write;

use crate::errors::AppsResult;
use crate::models::App;

/// Display options for structured output
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub hide_header: bool,
    /// One field per row instead of one record per row
    pub vertical: bool,
    pub json: bool,
}

/// Something that can be printed as a table
pub trait Presentable: Serialize {
    fn field_names(&self) -> Vec<&'static str>;
    fn records(&self) -> Vec<Vec<String>>;
}

pub struct AppList<'a> {
    pub apps: &'a [App],
}

pub struct AppInfo<'a> {
    pub app: &'a App,
}

impl Serialize for AppList<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.apps.serialize(serializer)
    }
}

impl Serialize for AppInfo<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.app.serialize(serializer)
    }
}

fn format_deploy(app: &App) -> String {
    app.latest_deploy
        .map(|at| at.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_default()
}

impl Presentable for AppList<'_> {
    fn field_names(&self) -> Vec<&'static str> {
        vec!["NAME", "OWNER", "STATUS", "LATEST DEPLOY"]
    }

    fn records(&self) -> Vec<Vec<String>> {
        self.apps
            .iter()
            .map(|app| {
                vec![
                    app.name.clone(),
                    app.organization.slug.clone(),
                    app.status.to_string(),
                    format_deploy(app),
                ]
            })
            .collect()
    }
}

impl Presentable for AppInfo<'_> {
    fn field_names(&self) -> Vec<&'static str> {
        vec!["NAME", "OWNER", "VERSION", "STATUS", "HOSTNAME"]
    }

    fn records(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.app.name.clone(),
            self.app.organization.slug.clone(),
            self.app.version.to_string(),
            self.app.status.to_string(),
            self.app.hostname.clone().unwrap_or_default(),
        ]]
    }
}

/// Write `item` to `out` as a table, a vertical field list, or JSON
pub fn render(
    out: &mut dyn Write,
    item: &impl Presentable,
    options: RenderOptions,
) -> AppsResult<()> {
    if options.json {
        serde_json::to_writer_pretty(&mut *out, item).map_err(std::io::Error::from)?;
        writeln!(out)?;
        return Ok(());
    }

    let fields = item.field_names();
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);

    if options.vertical {
        for record in item.records() {
            for (field, value) in fields.iter().zip(record) {
                table.add_row(Row::new(vec![Cell::new(field), Cell::new(&value)]));
            }
        }
    } else {
        if !options.hide_header {
            table.set_titles(Row::new(fields.iter().map(|f| Cell::new(f)).collect()));
        }
        for record in item.records() {
            table.add_row(Row::new(record.iter().map(|v| Cell::new(v)).collect()));
        }
    }

    table.print(out)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::OrgKind;
    use crate::tests::test_utils::{app, org};

    #[test]
    fn test_list_has_header_and_rows() {
        let apps = vec![
            app("one", org("acme", OrgKind::Shared)),
            app("two", org("me", OrgKind::Personal)),
        ];
        let mut out = Vec::new();

        render(&mut out, &AppList { apps: &apps }, RenderOptions::default()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("LATEST DEPLOY"));
        assert!(text.contains("one"));
        assert!(text.contains("me"));
    }

    #[test]
    fn test_vertical_info_without_header() {
        let app = app("one", org("acme", OrgKind::Shared));
        let mut out = Vec::new();

        let options = RenderOptions {
            hide_header: true,
            vertical: true,
            json: false,
        };
        render(&mut out, &AppInfo { app: &app }, options).unwrap();

        let text = String::from_utf8(out).unwrap();
        let first = text.lines().next().unwrap();
        assert!(first.contains("NAME"));
        assert!(first.contains("one"));
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_json_output() {
        let apps = vec![app("one", org("acme", OrgKind::Shared))];
        let mut out = Vec::new();

        let options = RenderOptions {
            json: true,
            ..Default::default()
        };
        render(&mut out, &AppList { apps: &apps }, options).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["name"], "one");
        assert_eq!(value[0]["organization"]["slug"], "acme");
    }
}
