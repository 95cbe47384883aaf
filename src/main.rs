// qnorm
// Copyright (C) 2021  Univ. Artois & CNRS
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

mod app;

use qnorm_app_helper::AppHelper;

fn main() {
    let mut app = AppHelper::new(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS"),
        env!("CARGO_PKG_DESCRIPTION"),
    );
    app.add_command(Box::new(app::NormalizeCommand::new()));
    app.add_command(Box::new(app::NormalizeDirCommand::new()));
    app.add_command(Box::new(app::CheckCommand::default()));
    app.add_command(Box::new(app::MeasureCommand::new()));
    app.launch_app();
}
