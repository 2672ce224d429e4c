//! Unpaid ledger, zone admin, and statistics pages.

use crate::domain::Zone;
use crate::domain::ports::{StatsReport, UnpaidSummary};
use crate::inbound::http::flash::FlashMessage;

use super::{escape_html, layout, money, timestamp};

pub fn unpaid(summary: &UnpaidSummary, flashes: &[FlashMessage]) -> String {
    if summary.rows.is_empty() {
        return layout("Unpaid jobs", flashes, "<p>Everything is paid up.</p>");
    }
    let rows: String = summary
        .rows
        .iter()
        .map(|row| {
            format!(
                "<tr><td>{done}</td><td><a href=\"/jobs/{job}\">#{job}</a></td><td>{name}</td>\
<td>{address}</td><td>{price}</td><td><form class=\"inline\" method=\"post\" \
action=\"/payments/{id}/mark-paid\"><button type=\"submit\">Mark paid</button></form></td></tr>",
                done = timestamp(row.completed_at),
                job = row.job_id,
                name = escape_html(&row.customer_name()),
                address = escape_html(&row.address()),
                price = money(row.price),
                id = row.history_id,
            )
        })
        .collect();
    let body = format!(
        "<table><thead><tr><th>Completed</th><th>Job</th><th>Customer</th><th>Address</th>\
<th>Price</th><th></th></tr></thead><tbody>{rows}</tbody></table>\
<p><strong>Outstanding: {total}</strong></p>",
        total = money(Some(summary.total)),
    );
    layout("Unpaid jobs", flashes, &body)
}

pub fn admin(zones: &[Zone], flashes: &[FlashMessage]) -> String {
    let rows: String = zones
        .iter()
        .map(|zone| {
            format!(
                "<li>{label} <form class=\"inline\" method=\"post\" \
action=\"/admin/zones/{id}/delete\"><button type=\"submit\">Delete</button></form></li>",
                id = zone.id,
                label = escape_html(&zone.label()),
            )
        })
        .collect();
    let list = if zones.is_empty() {
        "<p>No zones defined.</p>".to_owned()
    } else {
        format!("<ul>{rows}</ul>")
    };
    let body = format!(
        "<h2>Zones</h2>{list}<form method=\"post\" action=\"/admin/zones/add\">\
<label>New zone <input name=\"name\" required></label>\
<button type=\"submit\">Add zone</button></form>"
    );
    layout("Admin", flashes, &body)
}

pub fn stats(report: &StatsReport, flashes: &[FlashMessage]) -> String {
    let zone_rows: String = report
        .zones
        .iter()
        .map(|stat| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&stat.zone.label()),
                stat.job_count,
                money(Some(stat.total_price)),
            )
        })
        .collect();

    let week_rows: String = report
        .weeks
        .iter()
        .map(|earnings| {
            let marker = if earnings.week == report.selected_week {
                " class=\"selected\""
            } else {
                ""
            };
            format!(
                "<tr{marker}><td>{start} to {end}</td><td>{theoretical}</td><td>{actual}</td></tr>",
                start = earnings.week.start().format("%Y-%m-%d"),
                end = earnings.week.last_day().format("%Y-%m-%d"),
                theoretical = money(Some(earnings.theoretical)),
                actual = money(Some(earnings.actual)),
            )
        })
        .collect();

    let selected = report.selected_week.start().format("%Y-%m-%d");
    let body = format!(
        "<h2>Zones</h2><table><thead><tr><th>Zone</th><th>Jobs</th><th>Total</th></tr></thead>\
<tbody>{zone_rows}</tbody></table>\
<h2>Weekly earnings</h2><form method=\"get\" action=\"/stats\">\
<label>Week containing <input name=\"week\" type=\"date\" value=\"{selected}\"></label>\
<button type=\"submit\">Show</button></form>\
<table><thead><tr><th>Week</th><th>Expected</th><th>Completed</th></tr></thead>\
<tbody>{week_rows}</tbody></table>"
    );
    layout("Statistics", flashes, &body)
}
