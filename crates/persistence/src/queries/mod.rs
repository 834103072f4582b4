// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side Diesel queries against the `SQLite` schema.

pub mod audit;
pub mod leave_requests;
pub mod notifications;
pub mod users;
