// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含网关的用例实现和接口数据结构
pub mod dto;
pub mod usecases;
