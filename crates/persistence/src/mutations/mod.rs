// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side Diesel mutations against the `SQLite` schema.

pub mod notifications;
pub mod transition;
pub mod users;
